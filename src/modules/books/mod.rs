pub mod models;
pub mod routes;
pub mod service;

use async_trait::async_trait;
use axum::Router;
use bookshelf_kernel::{InitCtx, Module};

use service::BookService;

/// Books module: owns the in-memory collection and serves `/books`
pub struct BooksModule {
    service: BookService,
}

impl BooksModule {
    pub fn new(service: BookService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.service.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(serde_json::json!({
            "paths": {
                "/books": {
                    "post": {
                        "summary": "Add a book",
                        "tags": ["Books"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/BookPayload" }
                                }
                            }
                        },
                        "responses": {
                            "201": {
                                "description": "Book added; data carries the new bookId",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/BookCreatedEnvelope" }
                                    }
                                }
                            },
                            "400": {
                                "description": "Missing name, readPage greater than pageCount, or malformed body",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/FailEnvelope" }
                                    }
                                }
                            }
                        }
                    },
                    "get": {
                        "summary": "List books",
                        "tags": ["Books"],
                        "responses": {
                            "200": {
                                "description": "id, name and publisher of every book in insertion order",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/BookListEnvelope" }
                                    }
                                }
                            }
                        }
                    }
                },
                "/books/{bookId}": {
                    "parameters": [{
                        "name": "bookId",
                        "in": "path",
                        "required": true,
                        "schema": { "type": "string" }
                    }],
                    "get": {
                        "summary": "Get a book",
                        "tags": ["Books"],
                        "responses": {
                            "200": {
                                "description": "Full book record",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/BookDetailEnvelope" }
                                    }
                                }
                            },
                            "404": {
                                "description": "Book not found",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/FailEnvelope" }
                                    }
                                }
                            }
                        }
                    },
                    "put": {
                        "summary": "Replace a book's fields",
                        "tags": ["Books"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/BookPayload" }
                                }
                            }
                        },
                        "responses": {
                            "200": { "description": "Book updated" },
                            "400": {
                                "description": "Missing name, readPage greater than pageCount, or malformed body",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/FailEnvelope" }
                                    }
                                }
                            },
                            "404": {
                                "description": "Book not found",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/FailEnvelope" }
                                    }
                                }
                            }
                        }
                    },
                    "delete": {
                        "summary": "Delete a book",
                        "tags": ["Books"],
                        "responses": {
                            "200": { "description": "Book deleted" },
                            "404": {
                                "description": "Book not found",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/FailEnvelope" }
                                    }
                                }
                            }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "BookPayload": {
                        "type": "object",
                        "properties": {
                            "name": { "type": "string" },
                            "year": { "type": "integer" },
                            "author": { "type": "string" },
                            "summary": { "type": "string" },
                            "publisher": { "type": "string" },
                            "pageCount": { "type": "integer" },
                            "readPage": { "type": "integer" },
                            "reading": { "type": "boolean" }
                        },
                        "required": ["name"]
                    },
                    "Book": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "string" },
                            "name": { "type": "string" },
                            "year": { "type": ["integer", "null"] },
                            "author": { "type": ["string", "null"] },
                            "summary": { "type": ["string", "null"] },
                            "publisher": { "type": ["string", "null"] },
                            "pageCount": { "type": ["integer", "null"] },
                            "readPage": { "type": ["integer", "null"] },
                            "finished": { "type": "boolean" },
                            "reading": { "type": ["boolean", "null"] },
                            "insertedAt": { "type": "string", "format": "date-time" },
                            "updatedAt": { "type": "string", "format": "date-time" }
                        },
                        "required": ["id", "name", "finished", "insertedAt", "updatedAt"]
                    },
                    "BookSummary": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "string" },
                            "name": { "type": "string" },
                            "publisher": { "type": ["string", "null"] }
                        },
                        "required": ["id", "name"]
                    },
                    "BookCreatedEnvelope": {
                        "type": "object",
                        "properties": {
                            "status": { "type": "string" },
                            "message": { "type": "string" },
                            "data": {
                                "type": "object",
                                "properties": { "bookId": { "type": "string" } }
                            }
                        }
                    },
                    "BookListEnvelope": {
                        "type": "object",
                        "properties": {
                            "status": { "type": "string" },
                            "data": {
                                "type": "object",
                                "properties": {
                                    "books": {
                                        "type": "array",
                                        "items": { "$ref": "#/components/schemas/BookSummary" }
                                    }
                                }
                            }
                        }
                    },
                    "BookDetailEnvelope": {
                        "type": "object",
                        "properties": {
                            "status": { "type": "string" },
                            "data": {
                                "type": "object",
                                "properties": {
                                    "book": { "$ref": "#/components/schemas/Book" }
                                }
                            }
                        }
                    }
                }
            }
        }))
    }

    async fn stop(&self) -> anyhow::Result<()> {
        let discarded = self.service.len().await;
        tracing::info!(module = self.name(), discarded, "books module stopped");
        Ok(())
    }
}

/// Create a new instance of the books module with an empty collection
pub fn create_module() -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(BooksModule::new(BookService::new()))
}
