use async_trait::async_trait;
use classgate_core::{
    errors::ClassResult,
    notification::{GroupDirectory, Mailer, OutgoingEmail},
};
use mockall::mock;

mock! {
    pub Mailer {}

    #[async_trait]
    impl Mailer for Mailer {
        async fn send(&self, email: &OutgoingEmail) -> ClassResult<()>;
    }
}

mock! {
    pub GroupDirectory {}

    #[async_trait]
    impl GroupDirectory for GroupDirectory {
        async fn find_group(&self, batch: &str, subject: &str) -> ClassResult<Option<String>>;
    }
}
