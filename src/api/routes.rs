/*
 * Responsibility
 * - /api 配下の URL 構造を定義
 * - 公開: system-login / login / register
 * - authenticate_token (固定 secret): それ以外の業務 API 全部
 * - authorize_role: /system/{admin,dev}/session
 * - multipart を受ける route だけ body 上限を upload 種別に合わせる
 */
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post, put},
};

use crate::{
    api::handlers::{
        auth, cards, certificates, facial, humans, relationships, skills, space_time,
        specialities, system,
    },
    middleware::{auth::access, http::MULTIPART_OVERHEAD_BYTES},
    services::uploads::UploadKind,
    state::AppState,
};

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(public_routes())
        .merge(access::authenticate_token(protected_routes(), state.clone()))
        .merge(system_routes(state))
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/system-login", post(auth::system_login))
        .route("/auth/login", post(auth::login))
        .route("/auth/register", post(auth::register))
}

fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/auth", get(auth::list_users))
        .route(
            "/auth/{id}",
            get(auth::get_user)
                .put(auth::update_user)
                .delete(auth::delete_user),
        )
        .route("/human", get(humans::list_humans).post(humans::create_human))
        .route(
            "/human/{id}",
            get(humans::get_human)
                .put(humans::update_human)
                .delete(humans::delete_human),
        )
        .merge(certificate_routes())
        .merge(facial_routes())
        .route("/skill", get(skills::list_skills).post(skills::create_skill))
        .route(
            "/skill/{id}",
            get(skills::get_skill)
                .put(skills::update_skill)
                .delete(skills::delete_skill),
        )
        .route(
            "/speciality",
            get(specialities::list_specialities).post(specialities::create_speciality),
        )
        .route(
            "/speciality/{id}",
            get(specialities::get_speciality)
                .put(specialities::update_speciality)
                .delete(specialities::delete_speciality),
        )
        .route("/card", get(cards::list_cards).post(cards::create_card))
        .route(
            "/card/{id}",
            get(cards::get_card)
                .put(cards::update_card)
                .delete(cards::delete_card),
        )
        .route(
            "/space_time",
            get(space_time::list_space_time).post(space_time::create_space_time),
        )
        .route(
            "/space_time/{id}",
            get(space_time::get_space_time)
                .put(space_time::update_space_time)
                .delete(space_time::delete_space_time),
        )
        .route(
            "/relationships/human_skill",
            post(relationships::link_human_skill).delete(relationships::unlink_human_skill),
        )
        .route(
            "/relationships/skill_speciality",
            post(relationships::link_skill_speciality)
                .delete(relationships::unlink_skill_speciality),
        )
}

fn body_limit(kind: UploadKind) -> DefaultBodyLimit {
    DefaultBodyLimit::max(kind.max_bytes() as usize + MULTIPART_OVERHEAD_BYTES)
}

fn certificate_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/certificate",
            get(certificates::list_certificates).post(certificates::create_certificate),
        )
        .route(
            "/certificate/{id}",
            get(certificates::get_certificate)
                .put(certificates::update_certificate)
                .delete(certificates::delete_certificate),
        )
        .layer(body_limit(UploadKind::File))
}

fn facial_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/facial_recognition",
            get(facial::list_facial).post(facial::create_facial),
        )
        .route(
            "/facial_recognition/{id}",
            get(facial::get_facial).delete(facial::delete_facial),
        )
        .route("/facial_recognition/{id}/validate", put(facial::validate_facial))
        .layer(body_limit(UploadKind::Facial))
}

fn system_routes(state: AppState) -> Router<AppState> {
    let admin = access::authorize_role(
        Router::new().route("/system/admin/session", get(system::session)),
        state.clone(),
        "admin",
    );
    let dev = access::authorize_role(
        Router::new().route("/system/dev/session", get(system::session)),
        state,
        "dev",
    );

    admin.merge(dev)
}
