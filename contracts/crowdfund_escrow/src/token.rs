use soroban_sdk::{token, Address, Env};

use crate::errors::CrowdfundError;

/// Pull `amount` from `from` into the escrow's own balance.
///
/// Relies on `from` having approved this contract as spender on the token
/// beforehand. Any failure inside the token contract (missing allowance,
/// insufficient balance, frozen account) is reported as `TransferFailed`.
pub fn pull(
    env: &Env,
    token_address: &Address,
    from: &Address,
    amount: &i128,
) -> Result<(), CrowdfundError> {
    let escrow = env.current_contract_address();
    let client = token::Client::new(env, token_address);
    match client.try_transfer_from(&escrow, from, &escrow, amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(CrowdfundError::TransferFailed),
    }
}

/// Push `amount` out of the escrow's balance to `to`.
pub fn push(
    env: &Env,
    token_address: &Address,
    to: &Address,
    amount: &i128,
) -> Result<(), CrowdfundError> {
    let escrow = env.current_contract_address();
    let client = token::Client::new(env, token_address);
    match client.try_transfer(&escrow, to, amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(CrowdfundError::TransferFailed),
    }
}
