use actix_web::{
    patch, post,
    web::{scope, Data, ServiceConfig},
    HttpRequest, HttpResponse,
};
use actix_web_validator::Json;

use crate::api::auth::extractor::AuthenticatedUser;
use crate::api::auth::limiter::AuthRateLimiter;
use crate::api::auth::models::{LoginUser, RegisterUser, UpdateUser};
use crate::api::auth::service::AuthService;
use crate::api::error::ServiceError;

#[post("/register")]
async fn register(
    req: HttpRequest,
    service: Data<AuthService>,
    limiter: Data<AuthRateLimiter>,
    input: Json<RegisterUser>,
) -> Result<HttpResponse, ServiceError> {
    limiter.check(&req)?;
    let response = service.register(&input).await?;
    Ok(HttpResponse::Created().json(response))
}

#[post("/login")]
async fn login(
    req: HttpRequest,
    service: Data<AuthService>,
    limiter: Data<AuthRateLimiter>,
    input: Json<LoginUser>,
) -> Result<HttpResponse, ServiceError> {
    limiter.check(&req)?;
    let response = service.login(&input).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[patch("/updateUser")]
async fn update_user(
    service: Data<AuthService>,
    user: AuthenticatedUser,
    input: Json<UpdateUser>,
) -> Result<HttpResponse, ServiceError> {
    let response = service.update_user(&user, &input).await?;
    Ok(HttpResponse::Ok().json(response))
}

pub fn auth_config(config: &mut ServiceConfig) {
    config.service(
        scope("/auth")
            .service(register)
            .service(login)
            .service(update_user),
    );
}
