use soroban_sdk::{log, token, Address, Env};

use crate::ContractError;

/// Moves fungible balances between holders and the contract's custody
/// account. The engine only books what the port confirms.
pub trait AssetTransferPort {
    /// Pull `amount` of `asset` from `holder` into custody.
    fn transfer_in(&self, asset: &Address, holder: &Address, amount: i128)
        -> Result<(), ContractError>;

    /// Pay `amount` of `asset` out of custody to `holder`.
    fn transfer_out(&self, asset: &Address, holder: &Address, amount: i128)
        -> Result<(), ContractError>;

    /// Balance of `asset` currently held in custody.
    fn held(&self, asset: &Address) -> Result<i128, ContractError>;
}

/// Refuse a reward payout of `amount` in `asset` that custody can only make
/// by spending principal. `committed` is the principal staked in `asset`
/// across all pools.
pub fn require_reward_cover(
    env: &Env,
    custody: &impl AssetTransferPort,
    asset: &Address,
    amount: i128,
    committed: i128,
) -> Result<(), ContractError> {
    let free = custody.held(asset)?.saturating_sub(committed);
    if amount > free {
        log!(env, "rejected: payout {} exceeds free reward balance {}", amount, free);
        return Err(ContractError::TransferFailed);
    }
    Ok(())
}

/// Custody backed by Stellar asset contracts held by this contract.
pub struct TokenCustody<'a> {
    env: &'a Env,
}

impl<'a> TokenCustody<'a> {
    pub fn new(env: &'a Env) -> Self {
        Self { env }
    }

    fn transfer(
        &self,
        asset: &Address,
        from: &Address,
        to: &Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        if amount == 0 {
            return Ok(());
        }
        // A failed sub-invocation (insufficient balance, missing auth,
        // exhausted budget) comes back as an error instead of trapping.
        match token::Client::new(self.env, asset).try_transfer(from, to, &amount) {
            Ok(Ok(())) => Ok(()),
            _ => Err(ContractError::TransferFailed),
        }
    }
}

impl AssetTransferPort for TokenCustody<'_> {
    fn transfer_in(
        &self,
        asset: &Address,
        holder: &Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        self.transfer(asset, holder, &self.env.current_contract_address(), amount)
    }

    fn transfer_out(
        &self,
        asset: &Address,
        holder: &Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        self.transfer(asset, &self.env.current_contract_address(), holder, amount)
    }

    fn held(&self, asset: &Address) -> Result<i128, ContractError> {
        let custody = self.env.current_contract_address();
        match token::Client::new(self.env, asset).try_balance(&custody) {
            Ok(Ok(balance)) => Ok(balance),
            _ => Err(ContractError::TransferFailed),
        }
    }
}
