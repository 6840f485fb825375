//! Request extractors that reject bad input with [`AppError::Validation`].

use axum::{
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
    Json,
};
use serde::{de::DeserializeOwned, Deserialize};
use validator::Validate;

use crate::errors::AppError;
use crate::models::period::Period;

/// JSON body that has been deserialized and passed its `validator` rules.
#[derive(Debug, Clone)]
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::Validation(rejection.body_text()))?;
        value.validate()?;
        Ok(ValidJson(value))
    }
}

#[derive(Debug, Deserialize)]
struct PeriodParams {
    #[serde(alias = "period")]
    time_range: Option<String>,
}

/// Reporting period from `?time_range=` (or `?period=`). Defaults to month;
/// anything other than day, week, month or year is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodQuery(pub Period);

impl<S> FromRequestParts<S> for PeriodQuery
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<PeriodParams>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::Validation(rejection.body_text()))?;

        let period = match params.time_range.as_deref() {
            None => Period::default(),
            Some(raw) => raw
                .parse::<Period>()
                .map_err(|e| AppError::Validation(e.to_string()))?,
        };
        Ok(PeriodQuery(period))
    }
}
