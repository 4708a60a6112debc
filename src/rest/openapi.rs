// rest/openapi.rs — OpenAPI 3.1 spec for the task API.
//
// Served as JSON at GET /openapi.json. Kept in lockstep with the route
// declarations in rest/mod.rs.

use axum::{extract::State, Json};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::AppContext;

pub async fn openapi_spec(State(ctx): State<Arc<AppContext>>) -> Json<Value> {
    Json(json!({
        "openapi": "3.1.0",
        "info": {
            "title": "Task Manager API",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "Minimal task-manager HTTP service persisting tasks to a flat JSON file.",
            "license": { "name": "MIT" }
        },
        "servers": [
            { "url": format!("http://localhost:{}", ctx.config.port), "description": "Local server" }
        ],
        "components": {
            "schemas": {
                "Task": {
                    "type": "object",
                    "required": ["id", "title", "description", "status", "created_at"],
                    "properties": {
                        "id": { "type": "string", "format": "uuid" },
                        "title": { "type": "string" },
                        "description": { "type": "string" },
                        "status": { "type": "string", "enum": ["pending", "in_progress", "done"] },
                        "created_at": { "type": "string", "format": "date-time" },
                        "updated_at": {
                            "type": "string",
                            "format": "date-time",
                            "description": "Absent until the first title/description update."
                        }
                    }
                },
                "TaskInput": {
                    "type": "object",
                    "required": ["title", "description"],
                    "properties": {
                        "title": { "type": "string" },
                        "description": { "type": "string" }
                    }
                },
                "Error": {
                    "type": "object",
                    "properties": { "error": { "type": "string" } }
                }
            }
        },
        "paths": {
            "/": {
                "get": {
                    "operationId": "getHealth",
                    "summary": "Service health check",
                    "responses": { "200": { "description": "Service is running" } }
                }
            },
            "/tasks": {
                "get": {
                    "operationId": "listTasks",
                    "summary": "List all tasks in insertion order",
                    "responses": {
                        "200": {
                            "description": "Task list",
                            "content": {
                                "application/json": {
                                    "schema": { "type": "array", "items": { "$ref": "#/components/schemas/Task" } }
                                }
                            }
                        }
                    }
                },
                "post": {
                    "operationId": "createTask",
                    "summary": "Create a new task",
                    "requestBody": {
                        "required": true,
                        "content": {
                            "application/json": { "schema": { "$ref": "#/components/schemas/TaskInput" } }
                        }
                    },
                    "responses": {
                        "201": {
                            "description": "Created task",
                            "content": {
                                "application/json": { "schema": { "$ref": "#/components/schemas/Task" } }
                            }
                        },
                        "400": { "description": "Missing title or description" }
                    }
                }
            },
            "/tasks/{id}": {
                "get": {
                    "operationId": "getTask",
                    "summary": "Fetch a task by id",
                    "parameters": [{ "name": "id", "in": "path", "required": true, "schema": { "type": "string" } }],
                    "responses": {
                        "200": {
                            "description": "The task",
                            "content": {
                                "application/json": { "schema": { "$ref": "#/components/schemas/Task" } }
                            }
                        },
                        "404": { "description": "No task with that id" }
                    }
                },
                "put": {
                    "operationId": "updateTask",
                    "summary": "Update a task's title and description",
                    "parameters": [{ "name": "id", "in": "path", "required": true, "schema": { "type": "string" } }],
                    "requestBody": {
                        "required": true,
                        "content": {
                            "application/json": { "schema": { "$ref": "#/components/schemas/TaskInput" } }
                        }
                    },
                    "responses": {
                        "200": { "description": "Updated task" },
                        "400": { "description": "Missing title or description" },
                        "404": { "description": "No task with that id" }
                    }
                },
                "delete": {
                    "operationId": "deleteTask",
                    "summary": "Delete a task by id",
                    "parameters": [{ "name": "id", "in": "path", "required": true, "schema": { "type": "string" } }],
                    "responses": {
                        "200": { "description": "Confirmation message" },
                        "404": { "description": "No task with that id" }
                    }
                }
            },
            "/tasks/{id}/status": {
                "patch": {
                    "operationId": "setTaskStatus",
                    "summary": "Update only the status of a task",
                    "parameters": [{ "name": "id", "in": "path", "required": true, "schema": { "type": "string" } }],
                    "requestBody": {
                        "required": true,
                        "content": {
                            "application/json": {
                                "schema": {
                                    "type": "object",
                                    "required": ["status"],
                                    "properties": {
                                        "status": { "type": "string", "enum": ["pending", "in_progress", "done"] }
                                    }
                                }
                            }
                        }
                    },
                    "responses": {
                        "200": { "description": "Confirmation plus the updated task" },
                        "400": { "description": "Status outside the enumeration" },
                        "404": { "description": "No task with that id" }
                    }
                }
            },
            "/openapi.json": {
                "get": {
                    "operationId": "getOpenApi",
                    "summary": "This document",
                    "responses": { "200": { "description": "OpenAPI 3.1 spec" } }
                }
            }
        }
    }))
}
