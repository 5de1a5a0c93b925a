//! Context building - transaction attributes into an evaluation context

use fraudwatch_core::Transaction;
use fraudwatch_dsl::{EvaluationContext, Field};

/// Build the evaluation context for one transaction.
///
/// Amount is bound as a decimal, the rest as text. Optional attributes
/// that are absent on the transaction get no binding at all - a rule
/// touching them fails its context lookup and falls open.
pub fn build_context(transaction: &Transaction) -> EvaluationContext {
    let mut ctx = EvaluationContext::new()
        .with_number(Field::Amount, transaction.amount)
        .with_text(Field::Currency, transaction.currency.clone());

    if let Some(merchant_id) = &transaction.merchant_id {
        ctx = ctx.with_text(Field::MerchantId, merchant_id.clone());
    }
    if let Some(ip_address) = &transaction.ip_address {
        ctx = ctx.with_text(Field::IpAddress, ip_address.clone());
    }
    if let Some(device_id) = &transaction.device_id {
        ctx = ctx.with_text(Field::DeviceId, device_id.clone());
    }

    ctx
}
