pub mod csa;
pub mod time;
pub mod timetable;
