pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use crate::routes::chat::ChatHub;
use crate::services::{
    admin_service::AdminService, application_service::ApplicationService,
    compare_service::CompareService, job_service::JobService, marketer_service::MarketerService,
    message_service::MessageService, post_service::PostService, storage_service::StorageService,
    user_service::UserService, vc_service::VcService,
};
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub user_service: UserService,
    pub job_service: JobService,
    pub application_service: ApplicationService,
    pub message_service: MessageService,
    pub post_service: PostService,
    pub compare_service: CompareService,
    pub admin_service: AdminService,
    pub marketer_service: MarketerService,
    pub vc_service: VcService,
    pub storage: StorageService,
    pub chat: ChatHub,
}

impl AppState {
    pub fn new(pool: PgPool, storage: StorageService) -> Self {
        let user_service = UserService::new(pool.clone());
        let job_service = JobService::new(pool.clone());
        let application_service = ApplicationService::new(pool.clone());
        let message_service = MessageService::new(pool.clone());
        let post_service = PostService::new(pool.clone());
        let compare_service = CompareService::new(pool.clone());
        let admin_service = AdminService::new(pool.clone());
        let marketer_service = MarketerService::new(pool.clone());
        let vc_service = VcService::new(pool.clone());

        Self {
            pool,
            user_service,
            job_service,
            application_service,
            message_service,
            post_service,
            compare_service,
            admin_service,
            marketer_service,
            vc_service,
            storage,
            chat: ChatHub::new(256),
        }
    }
}
