pub mod admin_service;
pub mod application_service;
pub mod compare_service;
pub mod job_service;
pub mod marketer_service;
pub mod message_service;
pub mod post_service;
pub mod storage_service;
pub mod user_service;
pub mod vc_service;
