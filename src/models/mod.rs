//! Core data models for the rate engine.
//!
//! This module contains all the domain models used throughout the engine.

mod arrangement;
mod attendance;
mod calculation_result;
mod project;
mod resource;
mod role;

pub use arrangement::{ArrangementKey, RateField, WorkArrangementForm, WorkArrangementRates};
pub use attendance::{
    AttendanceLog, AttendanceMark, AttendanceRecord, AttendanceSpan, AttendanceStatus,
    AttendanceSummary, default_time_in, default_time_out, is_working_day,
};
pub use calculation_result::{
    AuditStep, AuditTrace, AuditWarning, InheritedRate, RateSource, ResourceCosting,
};
pub use project::{Project, ProjectDraft, ProjectStatus};
pub use resource::{BloodGroup, PersonalDetails, Resource, ResourceAssignment, ResourceType};
pub use role::{Role, RoleDraft};
