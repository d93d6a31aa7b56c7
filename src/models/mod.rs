pub mod case;
pub mod claim;
pub mod returns;
