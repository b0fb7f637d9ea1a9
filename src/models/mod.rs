// Data models
// Value types shared by the recurrence engine and its callers

pub mod repeating;
pub mod time;
