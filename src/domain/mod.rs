pub mod category;
pub mod customer;
pub mod validation;
