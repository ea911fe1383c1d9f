//! 产品 CRUD handlers

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use tienda_common::jsonapi::{Document, RequestDocument, Resource};
use tienda_errors::{AppError, AppResult};
use tracing::info;

use super::AppState;
use crate::domain::{NewProduct, Product};

const RESOURCE_TYPE: &str = "products";

/// 产品资源属性（线上契约：西语字段名，价格为数字）
#[derive(Debug, Serialize)]
pub struct ProductAttributes {
    pub nombre: String,
    pub precio: f64,
    pub descripcion: Option<String>,
}

impl From<Product> for Resource<ProductAttributes> {
    fn from(product: Product) -> Self {
        Resource::new(
            RESOURCE_TYPE,
            product.id,
            ProductAttributes {
                nombre: product.nombre,
                precio: product.precio.to_f64().unwrap_or_default(),
                descripcion: product.descripcion,
            },
        )
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateProductAttributes {
    pub nombre: Option<String>,
    pub precio: Option<Decimal>,
    pub descripcion: Option<String>,
}

pub async fn create_product(
    State(state): State<AppState>,
    body: Result<Json<RequestDocument<CreateProductAttributes>>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Document<Resource<ProductAttributes>>>)> {
    let Json(doc) = body.map_err(|_| AppError::validation("Formato JSON API inválido"))?;
    let attrs = doc.attributes_for(RESOURCE_TYPE)?;

    let (nombre, precio) = match (attrs.nombre, attrs.precio) {
        (Some(nombre), Some(precio)) if !nombre.is_empty() => (nombre, precio),
        _ => return Err(AppError::validation("Nombre y precio son requeridos")),
    };

    let product = state
        .products
        .create(NewProduct {
            nombre,
            precio,
            descripcion: attrs.descripcion,
        })
        .await?;

    info!(product_id = product.id, "Product created");

    Ok((
        StatusCode::CREATED,
        Json(Document::new(product.into())),
    ))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Document<Resource<ProductAttributes>>>> {
    let product = state
        .products
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Producto no encontrado"))?;

    Ok(Json(Document::new(product.into())))
}

pub async fn list_products(
    State(state): State<AppState>,
) -> AppResult<Json<Document<Vec<Resource<ProductAttributes>>>>> {
    let products = state.products.find_all().await?;
    let resources = products.into_iter().map(Into::into).collect();

    Ok(Json(Document::new(resources)))
}
