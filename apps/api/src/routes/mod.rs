pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::ai::handlers as ai;
use crate::render::handlers as render;
use crate::state::AppState;
use crate::store::handlers as store;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // AI endpoints
        .route("/api/v1/ai/analyze-jd", post(ai::handle_analyze_jd))
        .route("/api/v1/ai/ats-score", post(ai::handle_ats_score))
        .route("/api/v1/ai/cover-letter", post(ai::handle_cover_letter))
        .route("/api/v1/ai/enhance", post(ai::handle_enhance))
        .route("/api/v1/ai/enhance-batch", post(ai::handle_enhance_batch))
        .route("/api/v1/ai/generate", post(ai::handle_generate))
        .route("/api/v1/ai/parse", post(ai::handle_parse))
        // Resume CRUD
        .route(
            "/api/v1/resumes",
            get(store::handle_list_resumes).post(store::handle_create_resume),
        )
        .route(
            "/api/v1/resumes/:id",
            get(store::handle_get_resume)
                .patch(store::handle_update_resume)
                .delete(store::handle_delete_resume),
        )
        // Templates and export
        .route("/api/v1/templates", get(render::handle_list_templates))
        .route("/api/v1/export/:resume_id", get(render::handle_export_pdf))
        .route(
            "/api/v1/export-docx/:resume_id",
            get(render::handle_export_docx),
        )
        .with_state(state)
}
