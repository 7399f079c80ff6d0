use async_trait::async_trait;
use axum::{extract::State, routing::get, Json, Router};
use bookshelf_http::{error::route_not_found, response::Status};
use bookshelf_kernel::{InitCtx, Module};
use serde::Serialize;

/// Serves the fixed `/author` identity route
pub struct AuthorModule {
    author: String,
}

impl AuthorModule {
    pub fn new(author: impl Into<String>) -> Self {
        Self {
            author: author.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct AuthorReply {
    status: Status,
    author: String,
}

#[async_trait]
impl Module for AuthorModule {
    fn name(&self) -> &'static str {
        "author"
    }

    async fn init(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), author = %self.author, "author module initialized");
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/author", get(get_author).fallback(route_not_found))
            .with_state(self.author.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(serde_json::json!({
            "paths": {
                "/author": {
                    "get": {
                        "summary": "Service author",
                        "tags": ["Meta"],
                        "responses": {
                            "200": {
                                "description": "Author identifier",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "object",
                                            "properties": {
                                                "status": { "type": "string" },
                                                "author": { "type": "string" }
                                            },
                                            "required": ["status", "author"]
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }))
    }
}

async fn get_author(State(author): State<String>) -> Json<AuthorReply> {
    Json(AuthorReply {
        status: Status::Success,
        author,
    })
}

/// Create the author module reporting `author`
pub fn create_module(author: impl Into<String>) -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(AuthorModule::new(author))
}
