// crates/seigledger-engine/src/deposit.rs
//
// Deposit and two-phase withdrawal bookkeeping.
//
// The deposit manager owns the per-(operator, depositor) book: the amount
// deposited and the FIFO queue of pending withdrawal requests. A request
// locks funds immediately (they stop earning seigniorage the moment the
// stake is burned from the coinage) but releases them only after the
// global withdrawal delay has elapsed, strictly in request order.

use std::collections::{HashMap, VecDeque};

use primitive_types::U256;
use serde::{Deserialize, Serialize};

use seigledger_core::amount::BlockNumber;
use seigledger_core::{Address, LedgerError};

/// One pending withdrawal: an amount and the block it was requested at.
/// It becomes processable at `requested_at + withdrawal_delay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawalRequest {
    pub amount: U256,
    pub requested_at: BlockNumber,
}

#[derive(Debug, Default)]
struct AccountBook {
    /// Deposited WTON not yet released. Invariant: `deposited` covers the
    /// sum of all pending requests at all times.
    deposited: U256,
    pending: VecDeque<WithdrawalRequest>,
}

impl AccountBook {
    fn pending_total(&self) -> U256 {
        self.pending
            .iter()
            .fold(U256::zero(), |acc, r| acc.saturating_add(r.amount))
    }
}

/// Per-(operator, depositor) deposit and withdrawal-request book.
#[derive(Debug)]
pub struct DepositManager {
    withdrawal_delay: BlockNumber,
    books: HashMap<(Address, Address), AccountBook>,
}

impl DepositManager {
    pub fn new(withdrawal_delay: BlockNumber) -> Self {
        Self {
            withdrawal_delay,
            books: HashMap::new(),
        }
    }

    /// The global withdrawal delay in blocks.
    pub fn withdrawal_delay(&self) -> BlockNumber {
        self.withdrawal_delay
    }

    /// Credit a deposit to the book.
    pub fn deposit(&mut self, operator: Address, account: Address, amount: U256) {
        let book = self.books.entry((operator, account)).or_default();
        book.deposited = book.deposited.saturating_add(amount);
    }

    /// Open a withdrawal request for funds not already pending.
    ///
    /// # Errors
    /// Returns `LedgerError::InsufficientBalance` if `amount` exceeds
    /// `deposited - pending`. No state changes on error.
    pub fn request_withdrawal(
        &mut self,
        operator: Address,
        account: Address,
        amount: U256,
        current_block: BlockNumber,
    ) -> Result<WithdrawalRequest, LedgerError> {
        let book = self.books.entry((operator, account)).or_default();
        let available = book.deposited.saturating_sub(book.pending_total());
        if amount > available {
            return Err(LedgerError::InsufficientBalance {
                requested: amount,
                available,
            });
        }
        let request = WithdrawalRequest {
            amount,
            requested_at: current_block,
        };
        book.pending.push_back(request);
        Ok(request)
    }

    /// Process the oldest pending request for (operator, account).
    ///
    /// Requests are strictly FIFO: a later request can never be processed
    /// before an earlier unprocessed one. Each request succeeds exactly
    /// once; on success it is removed and `deposited` is debited.
    ///
    /// # Errors
    /// Returns `LedgerError::WithdrawalDelayNotElapsed` while the head
    /// request is inside its delay window, and
    /// `LedgerError::InsufficientBalance` when nothing is pending.
    pub fn process_request(
        &mut self,
        operator: Address,
        account: Address,
        current_block: BlockNumber,
    ) -> Result<WithdrawalRequest, LedgerError> {
        let book = self
            .books
            .get_mut(&(operator, account))
            .ok_or(LedgerError::InsufficientBalance {
                requested: U256::zero(),
                available: U256::zero(),
            })?;
        let head = *book
            .pending
            .front()
            .ok_or(LedgerError::InsufficientBalance {
                requested: U256::zero(),
                available: U256::zero(),
            })?;

        let withdrawable_at = head.requested_at + self.withdrawal_delay;
        if current_block < withdrawable_at {
            return Err(LedgerError::WithdrawalDelayNotElapsed {
                withdrawable_at,
                current: current_block,
            });
        }

        book.pending.pop_front();
        book.deposited = book.deposited.saturating_sub(head.amount);
        Ok(head)
    }

    /// WTON still booked for (operator, account), pending included.
    pub fn deposited(&self, operator: Address, account: Address) -> U256 {
        self.books
            .get(&(operator, account))
            .map(|b| b.deposited)
            .unwrap_or_default()
    }

    /// Sum of unprocessed withdrawal requests for (operator, account).
    pub fn pending_total(&self, operator: Address, account: Address) -> U256 {
        self.books
            .get(&(operator, account))
            .map(AccountBook::pending_total)
            .unwrap_or_default()
    }

    pub fn pending_count(&self, operator: Address, account: Address) -> usize {
        self.books
            .get(&(operator, account))
            .map(|b| b.pending.len())
            .unwrap_or_default()
    }
}
