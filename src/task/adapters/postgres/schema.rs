//! Diesel schema for task persistence.

diesel::table! {
    /// Task records.
    tasks (id) {
        /// Storage-assigned task identifier.
        id -> Int8,
        /// Task title.
        #[max_length = 100]
        title -> Varchar,
        /// Optional task description.
        #[max_length = 250]
        description -> Nullable<Varchar>,
        /// Priority level.
        #[max_length = 20]
        priority -> Varchar,
        /// Progress status.
        #[max_length = 20]
        status -> Varchar,
        /// Due date.
        due_date -> Date,
        /// Completion timestamp.
        completed_at -> Nullable<Timestamptz>,
    }
}
