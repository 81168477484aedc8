pub mod employee;
pub mod leave;
pub mod meeting;
pub mod ticket;
