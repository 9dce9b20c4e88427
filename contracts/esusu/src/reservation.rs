//! Funding reservations are token allowances a member grants this contract.
//! Joining only checks them; funds move at pull time.

use soroban_sdk::{token, Address, Env};

use crate::errors::ContractError;

/// Checks that `member` has both authorised and holds at least `required`.
/// Returns the authorised ceiling.
pub fn validate(
    env: &Env,
    token_id: &Address,
    member: &Address,
    required: i128,
) -> Result<i128, ContractError> {
    let client = token::Client::new(env, token_id);
    let approved = client.allowance(member, &env.current_contract_address());
    if approved < required {
        return Err(ContractError::InsufficientFunds);
    }
    if client.balance(member) < required {
        return Err(ContractError::InsufficientFunds);
    }
    Ok(approved)
}

/// Pulls `amount` from `member` into this contract against their allowance.
/// A revoked or exhausted reservation surfaces as `InsufficientFunds` and
/// leaves no partial transfer behind.
pub fn withdraw(
    env: &Env,
    token_id: &Address,
    member: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    let client = token::Client::new(env, token_id);
    let this = env.current_contract_address();
    match client.try_transfer_from(&this, member, &this, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(ContractError::InsufficientFunds),
    }
}

/// Balance-only check, for funds the member spends outside the allowance.
pub fn ensure_balance(
    env: &Env,
    token_id: &Address,
    member: &Address,
    required: i128,
) -> Result<(), ContractError> {
    if token::Client::new(env, token_id).balance(member) < required {
        return Err(ContractError::InsufficientFunds);
    }
    Ok(())
}

/// Sends `amount` held by this contract to `recipient`. Returns false if the
/// transfer was refused, in which case the funds stay with this contract.
pub fn pay_out(env: &Env, token_id: &Address, recipient: &Address, amount: i128) -> bool {
    let client = token::Client::new(env, token_id);
    matches!(
        client.try_transfer(&env.current_contract_address(), recipient, &amount),
        Ok(Ok(()))
    )
}

/// Releases a held payout. Traps if the recipient still cannot receive.
pub fn release(env: &Env, token_id: &Address, recipient: &Address, amount: i128) {
    token::Client::new(env, token_id).transfer(
        &env.current_contract_address(),
        recipient,
        &amount,
    );
}
