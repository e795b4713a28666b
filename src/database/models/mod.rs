mod payment;
mod student;
mod user;

pub use payment::{NewPayment, Payment};
pub use student::Student;
pub use user::User;
