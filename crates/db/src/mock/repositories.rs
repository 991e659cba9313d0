use async_trait::async_trait;
use chrono::NaiveDate;
use classgate_core::{
    models::{
        attendance::{Attendance, AttendanceQuery, NewAttendance},
        enrollment::Enrollment,
        recording::{CreateRecordingRequest, Recording},
        schedule::{CreateScheduleRequest, RescheduleRequest, Schedule},
        teacher::TeacherAssignment,
    },
    repository::{
        AttendanceRepository, EnrollmentRepository, RecordingRepository, ScheduleRepository,
        TeacherRepository,
    },
};
use mockall::mock;
use uuid::Uuid;

// One mock covering every repository, so it satisfies both store bundles
mock! {
    pub Store {}

    #[async_trait]
    impl ScheduleRepository for Store {
        async fn find_schedule_by_id(&self, id: Uuid) -> eyre::Result<Option<Schedule>>;

        async fn list_schedules_with_reminder(&self) -> eyre::Result<Vec<Schedule>>;

        async fn list_schedules_for_class(
            &self,
            batch: &str,
            subject: &str,
        ) -> eyre::Result<Vec<Schedule>>;

        async fn create_schedule(&self, request: &CreateScheduleRequest) -> eyre::Result<Schedule>;

        async fn reschedule(
            &self,
            id: Uuid,
            request: &RescheduleRequest,
        ) -> eyre::Result<Option<Schedule>>;

        async fn mark_reminder_sent(&self, id: Uuid, date: NaiveDate) -> eyre::Result<()>;
    }

    #[async_trait]
    impl AttendanceRepository for Store {
        async fn find_attendance(&self, query: &AttendanceQuery) -> eyre::Result<Vec<Attendance>>;

        async fn upsert_attendance(&self, record: &NewAttendance) -> eyre::Result<Attendance>;
    }

    #[async_trait]
    impl EnrollmentRepository for Store {
        async fn find_enrollment_by_id(&self, id: Uuid) -> eyre::Result<Option<Enrollment>>;
    }

    #[async_trait]
    impl TeacherRepository for Store {
        async fn find_teacher_by_user_id(
            &self,
            user_id: Uuid,
        ) -> eyre::Result<Option<TeacherAssignment>>;

        async fn list_teachers(&self) -> eyre::Result<Vec<TeacherAssignment>>;
    }

    #[async_trait]
    impl RecordingRepository for Store {
        async fn create_recording(&self, request: &CreateRecordingRequest) -> eyre::Result<Recording>;

        async fn list_unannounced_recordings(&self, date: NaiveDate) -> eyre::Result<Vec<Recording>>;

        async fn mark_recording_email_sent(&self, id: Uuid) -> eyre::Result<()>;
    }
}
