//! Customer HTTP routes.

use actix_web::{web, HttpRequest, HttpResponse};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::db::txn::with_txn;
use crate::domain::Currency;
use crate::error::AppError;
use crate::extractors::{CustomerId, ValidatedJson};
use crate::repos::accounts::CurrencyAccount;
use crate::services::customers::{CustomerService, CustomerView, NewCustomer};
use crate::services::exchange::{ExchangeOrder, ExchangeService};
use crate::state::app_state::AppState;
use crate::validation::{
    decimal_min_zero, digits, money, not_blank, not_null, positive, FieldErrors,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyAccountDto {
    pub currency: Currency,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub is_main_account: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDto {
    pub account_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub account_balance: Vec<CurrencyAccountDto>,
}

impl From<&CurrencyAccount> for CurrencyAccountDto {
    fn from(account: &CurrencyAccount) -> Self {
        Self {
            currency: account.currency,
            amount: account.balance.to_decimal(),
            is_main_account: account.is_main_account,
        }
    }
}

impl From<CustomerView> for CustomerDto {
    fn from(view: CustomerView) -> Self {
        Self {
            account_id: view.customer.id,
            first_name: view.customer.first_name,
            last_name: view.customer.last_name,
            account_balance: view.accounts.iter().map(CurrencyAccountDto::from).collect(),
        }
    }
}

/// Every field is optional at the JSON level so a missing field is reported
/// as a field violation instead of a parse error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub main_account_balance: Option<Decimal>,
    pub main_account_currency: Option<Currency>,
    pub additional_currencies: Option<Vec<Currency>>,
}

impl CreateCustomerRequest {
    /// Names are kept exactly as sent; blank ones are rejected.
    pub fn validate(self) -> Result<NewCustomer, AppError> {
        let first_name = not_blank(self.first_name);
        let last_name = not_blank(self.last_name);
        let main_balance = not_null(self.main_account_balance)
            .and_then(decimal_min_zero)
            .and_then(digits)
            .and_then(money);
        let additional_currencies = not_null(self.additional_currencies);

        match (first_name, last_name, main_balance, additional_currencies) {
            (Ok(first_name), Ok(last_name), Ok(main_balance), Ok(additional_currencies)) => {
                Ok(NewCustomer {
                    first_name,
                    last_name,
                    main_balance,
                    main_currency: self.main_account_currency,
                    additional_currencies,
                })
            }
            (first_name, last_name, main_balance, additional_currencies) => {
                let mut errors = FieldErrors::new();
                errors
                    .check("firstName", &first_name)
                    .check("lastName", &last_name)
                    .check("mainAccountBalance", &main_balance)
                    .check("additionalCurrencies", &additional_currencies);
                Err(errors.into_error())
            }
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRequest {
    pub from_currency: Option<Currency>,
    pub to_currency: Option<Currency>,
    pub amount: Option<Decimal>,
}

impl ExchangeRequest {
    pub fn validate(self) -> Result<ExchangeOrder, AppError> {
        let from = not_null(self.from_currency);
        let to = not_null(self.to_currency);
        let amount = not_null(self.amount)
            .and_then(positive)
            .and_then(digits)
            .and_then(money);

        match (from, to, amount) {
            (Ok(from), Ok(to), Ok(amount)) => Ok(ExchangeOrder { from, to, amount }),
            (from, to, amount) => {
                let mut errors = FieldErrors::new();
                errors
                    .check("fromCurrency", &from)
                    .check("toCurrency", &to)
                    .check("amount", &amount);
                Err(errors.into_error())
            }
        }
    }
}

/// GET /customers/{customer_id}
async fn get_customer(
    http_req: HttpRequest,
    customer_id: CustomerId,
    app_state: web::Data<AppState>,
) -> Result<web::Json<CustomerDto>, AppError> {
    let id = customer_id.0;

    let view = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move { CustomerService::new().fetch_customer(txn, id).await })
    })
    .await?;

    Ok(web::Json(CustomerDto::from(view)))
}

/// POST /customers
async fn create_customer(
    http_req: HttpRequest,
    app_state: web::Data<AppState>,
    body: ValidatedJson<CreateCustomerRequest>,
) -> Result<HttpResponse, AppError> {
    let new_customer = body.into_inner().validate()?;

    let view = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move {
            CustomerService::new()
                .create_customer(txn, new_customer)
                .await
        })
    })
    .await?;

    Ok(HttpResponse::Created().json(CustomerDto::from(view)))
}

/// POST /customers/{customer_id}/exchange
///
/// Two transactions: one to check the order, one to settle it. Rates are
/// fetched in between, outside any transaction.
async fn exchange(
    http_req: HttpRequest,
    customer_id: CustomerId,
    app_state: web::Data<AppState>,
    body: ValidatedJson<ExchangeRequest>,
) -> Result<web::Json<CustomerDto>, AppError> {
    let order = body.into_inner().validate()?;
    let id = customer_id.0;
    let service = ExchangeService::new(app_state.rates());

    let prepared = {
        let service = service.clone();
        with_txn(Some(&http_req), &app_state, move |txn| {
            Box::pin(async move { service.prepare(txn, id, order).await })
        })
        .await?
    };

    let quote = service.quote(prepared).await?;

    let view = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move { service.settle(txn, quote).await })
    })
    .await?;

    Ok(web::Json(CustomerDto::from(view)))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::post().to(create_customer))
        .route("/{customer_id}", web::get().to(get_customer))
        .route("/{customer_id}/exchange", web::post().to(exchange));
}
