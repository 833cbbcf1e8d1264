use actix_web::{
    delete, get, patch, post,
    web::{scope, Data, Path, Query, ServiceConfig},
    HttpResponse,
};
use actix_web_validator::Json;

use crate::api::auth::AuthenticatedUser;
use crate::api::error::ServiceError;
use crate::engine::{ListingParams, ListingQuery};
use super::models::{CreateJob, UpdateJob};
use super::service::JobService;

#[get("")]
async fn list_jobs(
    service: Data<JobService>,
    user: AuthenticatedUser,
    query: Query<ListingQuery>,
) -> Result<HttpResponse, ServiceError> {
    let params = ListingParams::from(query.into_inner());
    let page = service.list_jobs(user.owner, &params).await?;
    Ok(HttpResponse::Ok().json(page))
}

#[post("")]
async fn create_job(
    service: Data<JobService>,
    user: AuthenticatedUser,
    job: Json<CreateJob>,
) -> Result<HttpResponse, ServiceError> {
    let response = service.create_job(&user, &job).await?;
    Ok(HttpResponse::Created().json(response))
}

#[get("/stats")]
async fn show_stats(
    service: Data<JobService>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, ServiceError> {
    let stats = service.show_stats(user.owner).await?;
    Ok(HttpResponse::Ok().json(stats))
}

#[get("/{id}")]
async fn get_job(
    service: Data<JobService>,
    user: AuthenticatedUser,
    id: Path<i32>,
) -> Result<HttpResponse, ServiceError> {
    let response = service.get_job(user.owner, id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[patch("/{id}")]
async fn update_job(
    service: Data<JobService>,
    user: AuthenticatedUser,
    id: Path<i32>,
    patch: Json<UpdateJob>,
) -> Result<HttpResponse, ServiceError> {
    let response = service.update_job(&user, id.into_inner(), &patch).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[delete("/{id}")]
async fn delete_job(
    service: Data<JobService>,
    user: AuthenticatedUser,
    id: Path<i32>,
) -> Result<HttpResponse, ServiceError> {
    service.delete_job(&user, id.into_inner()).await?;
    Ok(HttpResponse::Ok().finish())
}

pub fn job_config(config: &mut ServiceConfig) {
    // `/stats` must be registered ahead of `/{id}`
    config.service(
        scope("/jobs")
            .service(list_jobs)
            .service(create_job)
            .service(show_stats)
            .service(get_job)
            .service(update_job)
            .service(delete_job),
    );
}
