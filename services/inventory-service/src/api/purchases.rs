//! 购买 handlers

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use tienda_common::jsonapi::{Document, RequestDocument, Resource};
use tienda_errors::{AppError, AppResult};

use super::AppState;
use crate::application::PurchaseConfirmation;
use crate::domain::PurchaseRecord;

const RESOURCE_TYPE: &str = "purchases";
const HISTORY_RESOURCE_TYPE: &str = "purchase-history";

#[derive(Debug, Deserialize)]
pub struct PurchaseRequestAttributes {
    pub producto_id: Option<i64>,
    pub cantidad: Option<i64>,
}

/// 购买结果属性（线上契约）
#[derive(Debug, Serialize)]
pub struct PurchaseAttributes {
    pub producto_id: i32,
    pub producto_nombre: String,
    pub cantidad: i32,
    pub precio_unitario: f64,
    pub total: f64,
    pub inventario_restante: i32,
    pub fecha: DateTime<Utc>,
}

impl From<PurchaseConfirmation> for Resource<PurchaseAttributes> {
    fn from(confirmation: PurchaseConfirmation) -> Self {
        Resource::new(
            RESOURCE_TYPE,
            confirmation.id,
            PurchaseAttributes {
                producto_id: confirmation.producto_id,
                producto_nombre: confirmation.producto_nombre,
                cantidad: confirmation.cantidad,
                precio_unitario: confirmation.precio_unitario.to_f64().unwrap_or_default(),
                total: confirmation.total.to_f64().unwrap_or_default(),
                inventario_restante: confirmation.inventario_restante,
                fecha: confirmation.fecha,
            },
        )
    }
}

pub async fn create_purchase(
    State(state): State<AppState>,
    body: Result<Json<RequestDocument<PurchaseRequestAttributes>>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Document<Resource<PurchaseAttributes>>>)> {
    let Json(doc) = body.map_err(|_| AppError::validation("Formato JSON API inválido"))?;
    let attrs = doc.attributes_for(RESOURCE_TYPE)?;

    // 形状校验在任何 I/O 之前完成
    let producto_id = attrs
        .producto_id
        .and_then(|value| i32::try_from(value).ok());
    let cantidad = attrs
        .cantidad
        .and_then(|value| i32::try_from(value).ok())
        .filter(|value| *value > 0);

    let (Some(producto_id), Some(cantidad)) = (producto_id, cantidad) else {
        return Err(AppError::validation(
            "producto_id y cantidad (mayor a 0) son requeridos",
        ));
    };

    // 工作流一旦开始就运行到底：客户端提前断开不会在扣减与历史写入之间取消
    let purchases = state.purchases.clone();
    let confirmation = tokio::spawn(async move { purchases.execute(producto_id, cantidad).await })
        .await
        .map_err(|e| AppError::internal(format!("Purchase task failed: {}", e)))??;

    Ok((
        StatusCode::CREATED,
        Json(Document::new(confirmation.into())),
    ))
}

/// 历史条目属性（线上契约，价格为数字）
#[derive(Debug, Serialize)]
pub struct HistoryAttributes {
    pub producto_id: i32,
    pub cantidad: i32,
    pub precio_unitario: f64,
    pub total: f64,
    pub fecha: DateTime<Utc>,
}

impl From<PurchaseRecord> for Resource<HistoryAttributes> {
    fn from(record: PurchaseRecord) -> Self {
        Resource::new(
            HISTORY_RESOURCE_TYPE,
            record.id,
            HistoryAttributes {
                producto_id: record.producto_id,
                cantidad: record.cantidad,
                precio_unitario: record.precio_unitario.to_f64().unwrap_or_default(),
                total: record.total.to_f64().unwrap_or_default(),
                fecha: record.created_at,
            },
        )
    }
}

pub async fn purchase_history(
    State(state): State<AppState>,
    Path(producto_id): Path<i32>,
) -> AppResult<Json<Document<Vec<Resource<HistoryAttributes>>>>> {
    let records = state.inventory.purchase_history(producto_id).await?;
    let resources = records.into_iter().map(Into::into).collect();

    Ok(Json(Document::new(resources)))
}
