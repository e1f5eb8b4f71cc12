use crate::error::Error;
use crate::storage::{MAX_DECIMALS, MAX_TIME_TO_MATURITY};

pub struct Validator;

impl Validator {
    /// Zero moves nothing; negative amounts have no meaning.
    pub fn check_amount(amount: i128) -> Result<(), Error> {
        if amount == 0 {
            return Err(Error::ZeroAmount);
        }
        if amount < 0 {
            return Err(Error::InvalidAmount);
        }
        Ok(())
    }

    pub fn validate_terms(
        now: u64,
        maturity: u64,
        max_supply: i128,
        payment_decimals: u32,
    ) -> Result<(), Error> {
        Self::check_amount(max_supply)?;

        if maturity <= now {
            return Err(Error::InvalidMaturity);
        }

        let latest_maturity = now
            .checked_add(MAX_TIME_TO_MATURITY)
            .ok_or(Error::ArithmeticOverflow)?;
        if maturity > latest_maturity {
            return Err(Error::InvalidMaturity);
        }

        if payment_decimals > MAX_DECIMALS {
            return Err(Error::TooManyDecimals);
        }

        Ok(())
    }
}
