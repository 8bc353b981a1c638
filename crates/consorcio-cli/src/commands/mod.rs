pub mod compare;
pub mod consortium;
pub mod financing;
pub mod limits;
