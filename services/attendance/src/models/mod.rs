//! Attendance service models

pub mod attendance;
pub mod session;
pub mod student;
pub mod user;

// Re-export for convenience
pub use attendance::{
    Attendance, AttendanceStatus, CheckInRequest, CheckInResponse, NewAttendance,
    SessionAttendanceEntry, StudentReportEntry,
};
pub use session::{
    CreateSessionRequest, CreateSessionResponse, NewSession, QrSessionRequest, QrSessionResponse,
    Session, SessionResponse, WIRE_TIME_FORMAT,
};
pub use student::{NewStudent, Student, StudentLoginRequest, UpdateStudent};
pub use user::{LoginCredentials, NewTeacherRequest, NewUser, Role, UpdateUser, User};
