use actix_web::{get, patch, post, put, web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::admin::adapter::incoming::web::require_permission;
use crate::admin::application::domain::{AuditEntry, Permission};
use crate::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::payments::application::domain::PaymentStatus;
use crate::payments::application::ports::incoming::{
    CreatePaymentCommand, PaymentCommandError, PaymentError, UpdatePaymentCommand,
};
use crate::shared::api::ApiResponse;
use crate::shared::listing::ListQuery;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct PaymentRequest {
    pub user_id: Option<Uuid>,
    pub amount: Option<i64>,
    pub currency: Option<String>,
    pub method: Option<String>,
    pub transaction_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PaymentStatusRequest {
    pub status: PaymentStatus,
}

async fn guard(user: &AuthenticatedUser, data: &AppState) -> Result<(), HttpResponse> {
    require_permission(data.permission_checker.as_ref(), user, Permission::ManagePayments).await
}

#[get("/api/admin/payments")]
pub async fn list_payments_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> impl Responder {
    if let Err(resp) = guard(&user, &data).await {
        return resp;
    }

    match data.payment_use_case.list(query.into_inner()).await {
        Ok(payments) => ApiResponse::success(payments),
        Err(e) => map_payment_error(e),
    }
}

#[get("/api/admin/payments/{id}")]
pub async fn get_payment_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> impl Responder {
    if let Err(resp) = guard(&user, &data).await {
        return resp;
    }

    match data.payment_use_case.get(path.into_inner()).await {
        Ok(payment) => ApiResponse::success(payment),
        Err(e) => map_payment_error(e),
    }
}

#[post("/api/admin/payments")]
pub async fn create_payment_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
    payload: web::Json<PaymentRequest>,
) -> impl Responder {
    if let Err(resp) = guard(&user, &data).await {
        return resp;
    }

    let dto = payload.into_inner();
    let command = match CreatePaymentCommand::new(
        dto.user_id,
        dto.amount,
        dto.currency,
        dto.method,
        dto.transaction_id,
    ) {
        Ok(cmd) => cmd,
        Err(e) => return map_command_error(e),
    };

    match data.payment_use_case.create(command).await {
        Ok(payment) => {
            data.audit_logger.log_action(
                AuditEntry::new(user.user_id, "create_payment", "payment", Some(payment.id))
                    .with_details(json!({
                        "amount": payment.amount,
                        "currency": payment.currency,
                    })),
            );
            ApiResponse::created(payment)
        }
        Err(e) => map_payment_error(e),
    }
}

#[patch("/api/admin/payments/{id}")]
pub async fn update_payment_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
    path: web::Path<Uuid>,
    payload: web::Json<PaymentRequest>,
) -> impl Responder {
    if let Err(resp) = guard(&user, &data).await {
        return resp;
    }

    let id = path.into_inner();
    let dto = payload.into_inner();
    let command = match UpdatePaymentCommand::new(dto.method, dto.transaction_id) {
        Ok(cmd) => cmd,
        Err(e) => return map_command_error(e),
    };

    match data.payment_use_case.update(id, command).await {
        Ok(payment) => {
            data.audit_logger.log_action(
                AuditEntry::new(user.user_id, "update_payment", "payment", Some(id)).with_details(
                    json!({ "method": payment.method, "transaction_id": payment.transaction_id }),
                ),
            );
            ApiResponse::success(payment)
        }
        Err(e) => map_payment_error(e),
    }
}

#[put("/api/admin/payments/{id}/status")]
pub async fn change_payment_status_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
    path: web::Path<Uuid>,
    payload: web::Json<PaymentStatusRequest>,
) -> impl Responder {
    if let Err(resp) = guard(&user, &data).await {
        return resp;
    }

    let id = path.into_inner();
    let next = payload.status;
    match data.payment_use_case.change_status(id, next).await {
        Ok(payment) => {
            data.audit_logger.log_action(
                AuditEntry::new(user.user_id, "update_payment_status", "payment", Some(id))
                    .with_details(json!({ "status": next })),
            );
            ApiResponse::success(payment)
        }
        Err(e) => map_payment_error(e),
    }
}

#[post("/api/admin/payments/{id}/refund")]
pub async fn refund_payment_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> impl Responder {
    if let Err(resp) = guard(&user, &data).await {
        return resp;
    }

    let id = path.into_inner();
    match data.payment_use_case.refund(id).await {
        Ok(payment) => {
            data.audit_logger.log_action(
                AuditEntry::new(user.user_id, "refund_payment", "payment", Some(id)).with_details(
                    json!({ "amount": payment.amount, "currency": payment.currency }),
                ),
            );
            ApiResponse::success(payment)
        }
        Err(e) => map_payment_error(e),
    }
}

fn map_command_error(err: PaymentCommandError) -> HttpResponse {
    let code = match err {
        PaymentCommandError::MissingField(_) => "MISSING_FIELD",
        PaymentCommandError::InvalidAmount => "INVALID_AMOUNT",
        PaymentCommandError::InvalidCurrency => "INVALID_CURRENCY",
        PaymentCommandError::NoChanges => "VALIDATION_ERROR",
    };
    ApiResponse::bad_request(code, &err.to_string())
}

fn map_payment_error(err: PaymentError) -> HttpResponse {
    match err {
        PaymentError::NotFound => ApiResponse::not_found("PAYMENT_NOT_FOUND", "Payment not found"),
        PaymentError::InvalidTransition(e) => {
            ApiResponse::unprocessable("INVALID_TRANSITION", &e.to_string())
        }
        PaymentError::StatusChanged => {
            ApiResponse::conflict("STATUS_CHANGED", "Payment status was changed, reload and retry")
        }
        PaymentError::Internal(msg) => {
            tracing::error!("Payment operation failed: {}", msg);
            ApiResponse::internal_error()
        }
    }
}
