//! Repositories for database operations

pub mod attendance;
pub mod session;
pub mod student;
pub mod user;

pub use attendance::AttendanceRepository;
pub use session::SessionRepository;
pub use student::StudentRepository;
pub use user::UserRepository;
