use crate::model::{EntryId, ScheduleId};
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("unknown schedule: {0}")]
    UnknownSchedule(ScheduleId),
    #[error("no schedule for date {0}")]
    UnknownDate(NaiveDate),
    #[error("no current schedule selected")]
    NoCurrentSchedule,
    #[error("a schedule already exists for {0}")]
    DuplicateDate(NaiveDate),
    #[error("entry {0} already exists in schedule")]
    DuplicateEntry(EntryId),
}
