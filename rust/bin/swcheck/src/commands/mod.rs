pub mod approved;
pub mod check;
pub mod decode;
