use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // ============================================
    // INITIALIZATION ERRORS (1-9)
    // ============================================
    /// Bond already initialized
    AlreadyInitialized = 1,
    /// Bond not initialized
    NotInitialized = 2,

    // ============================================
    // CALL ERRORS (10-19)
    // ============================================
    /// A guarded operation is already in flight
    ReentrantCall = 11,

    // ============================================
    // LIFECYCLE ERRORS (20-29)
    // ============================================
    /// Operation only allowed before maturity
    BondPastMaturity = 20,
    /// Redemption needs full payment or an elapsed grace period
    BondBeforeGracePeriodAndNotPaid = 21,

    // ============================================
    // PAYMENT ERRORS (30-39)
    // ============================================
    /// Bond is already fully paid
    PaymentAlreadyMet = 30,
    /// No surplus above full payment to withdraw
    NoPaymentToWithdraw = 31,
    /// Sweeping this token would move the payment balance
    SweepDisallowedForToken = 32,

    // ============================================
    // AMOUNT/BALANCE ERRORS (40-49)
    // ============================================
    /// Requested or resulting amount is zero
    ZeroAmount = 40,
    /// Amount is negative
    InvalidAmount = 41,
    /// Holder doesn't have enough bond shares
    InsufficientBalance = 42,
    /// Spender allowance is too low
    InsufficientAllowance = 43,

    // ============================================
    // VALIDATION ERRORS (50-59)
    // ============================================
    /// Maturity must be in the future and within MAX_TIME_TO_MATURITY
    InvalidMaturity = 50,
    /// Payment token uses more than MAX_DECIMALS decimals
    TooManyDecimals = 51,
    /// Allowance expiry is before the current ledger
    InvalidLedgerSequence = 52,

    // ============================================
    // ARITHMETIC ERRORS (60-69)
    // ============================================
    /// Checked arithmetic overflowed or divided by zero
    ArithmeticOverflow = 60,
}
