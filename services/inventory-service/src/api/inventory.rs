//! 库存查询与更新 handlers

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use tienda_common::jsonapi::{Document, RequestDocument, Resource};
use tienda_errors::{AppError, AppResult};
use tracing::info;

use super::AppState;
use crate::domain::{InventoryRecord, RemoteProduct};

const RESOURCE_TYPE: &str = "inventory";

/// 库存资源属性；查询时内嵌上游产品属性
#[derive(Debug, Serialize)]
pub struct InventoryAttributes {
    pub producto_id: i32,
    pub cantidad: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub producto: Option<EmbeddedProduct>,
}

#[derive(Debug, Serialize)]
pub struct EmbeddedProduct {
    pub nombre: String,
    pub precio: f64,
    pub descripcion: Option<String>,
}

impl From<RemoteProduct> for EmbeddedProduct {
    fn from(product: RemoteProduct) -> Self {
        Self {
            nombre: product.nombre,
            precio: product.precio.to_f64().unwrap_or_default(),
            descripcion: product.descripcion,
        }
    }
}

fn to_resource(
    record: &InventoryRecord,
    producto: Option<EmbeddedProduct>,
) -> Resource<InventoryAttributes> {
    Resource::new(
        RESOURCE_TYPE,
        record.producto_id,
        InventoryAttributes {
            producto_id: record.producto_id,
            cantidad: record.cantidad,
            producto,
        },
    )
}

pub async fn get_inventory(
    State(state): State<AppState>,
    Path(producto_id): Path<i32>,
) -> AppResult<Json<Document<Resource<InventoryAttributes>>>> {
    let product = state.products.fetch(producto_id).await?;

    let record = state
        .inventory
        .find_by_product_id(producto_id)
        .await?
        .ok_or_else(|| AppError::not_found("Inventario no encontrado para este producto"))?;

    Ok(Json(Document::new(to_resource(
        &record,
        Some(product.into()),
    ))))
}

#[derive(Debug, Deserialize)]
pub struct UpdateInventoryAttributes {
    pub cantidad: Option<i64>,
}

pub async fn update_inventory(
    State(state): State<AppState>,
    Path(producto_id): Path<i32>,
    body: Result<Json<RequestDocument<UpdateInventoryAttributes>>, JsonRejection>,
) -> AppResult<Json<Document<Resource<InventoryAttributes>>>> {
    let Json(doc) = body.map_err(|_| AppError::validation("Formato JSON API inválido"))?;
    let attrs = doc.attributes_for(RESOURCE_TYPE)?;

    let cantidad = attrs
        .cantidad
        .and_then(|value| i32::try_from(value).ok())
        .filter(|value| *value >= 0)
        .ok_or_else(|| AppError::validation("Cantidad debe ser un número no negativo"))?;

    // 产品必须在上游存在才允许建立库存
    state.products.fetch(producto_id).await?;

    let record = state.inventory.upsert(producto_id, cantidad).await?;

    info!(producto_id, cantidad, "Inventory updated");

    Ok(Json(Document::new(to_resource(&record, None))))
}
