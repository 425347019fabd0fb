//! robolearn-report — HTML rendering of finished quiz sessions.

pub mod html;
