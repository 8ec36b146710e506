//! In-memory exchange for paper trading and tests.

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::debug;

use super::{Balances, ExchangeClient, ExchangeError, SubmitReceipt};
use crate::application::strategies::ladder_mm::types::{LiveOffer, MutationIntent, Side};

/// A toy venue: two depth-ordered books and a static paper balance.
///
/// Sell offers are kept ascending by price and buy offers descending, so the
/// list index is the ladder depth index, matching what a real venue returns.
pub struct PaperExchange {
    inner: RwLock<Inner>,
}

struct Inner {
    next_id: u64,
    sells: Vec<LiveOffer>,
    buys: Vec<LiveOffer>,
    balances: Balances,
}

impl Inner {
    fn book_mut(&mut self, side: Side) -> &mut Vec<LiveOffer> {
        match side {
            Side::Sell => &mut self.sells,
            Side::Buy => &mut self.buys,
        }
    }

    fn sort_book(&mut self, side: Side) {
        let ascending = side == Side::Sell;
        self.book_mut(side).sort_by(|a, b| {
            let ord = a.price.partial_cmp(&b.price).unwrap_or(std::cmp::Ordering::Equal);
            if ascending {
                ord
            } else {
                ord.reverse()
            }
        });
    }
}

impl PaperExchange {
    pub fn new(base_balance: f64, quote_balance: f64) -> Self {
        Self {
            inner: RwLock::new(Inner {
                next_id: 0,
                sells: Vec::new(),
                buys: Vec::new(),
                balances: Balances {
                    base: base_balance,
                    quote: quote_balance,
                },
            }),
        }
    }

    /// Number of resting offers on one side.
    pub fn open_offer_count(&self, side: Side) -> usize {
        let inner = self.inner.read();
        match side {
            Side::Sell => inner.sells.len(),
            Side::Buy => inner.buys.len(),
        }
    }
}

#[async_trait]
impl ExchangeClient for PaperExchange {
    async fn open_offers(&self, side: Side) -> Result<Vec<LiveOffer>, ExchangeError> {
        let inner = self.inner.read();
        Ok(match side {
            Side::Sell => inner.sells.clone(),
            Side::Buy => inner.buys.clone(),
        })
    }

    async fn balances(&self) -> Result<Balances, ExchangeError> {
        Ok(self.inner.read().balances)
    }

    async fn submit(
        &self,
        side: Side,
        intents: Vec<MutationIntent>,
    ) -> Result<SubmitReceipt, ExchangeError> {
        let mut inner = self.inner.write();

        // Apply the batch to a working copy; the book is only committed once
        // every intent has been accepted, so a bad intent leaves the venue
        // untouched.
        let mut book = inner.book_mut(side).clone();
        let mut next_id = inner.next_id;
        let mut receipt = SubmitReceipt::default();

        for intent in intents {
            match intent {
                MutationIntent::Create { price, amount } => {
                    next_id += 1;
                    let offer_id = format!("P-{}", next_id);
                    debug!("[paper:{}] create {} @ {} x {}", side, offer_id, price, amount);
                    book.push(LiveOffer::new(offer_id, price, amount));
                    receipt.created += 1;
                }
                MutationIntent::Modify {
                    offer,
                    price,
                    amount,
                } => {
                    debug!(
                        "[paper:{}] modify {} -> {} x {}",
                        side, offer.offer_id, price, amount
                    );
                    let resting = book
                        .iter_mut()
                        .find(|o| o.offer_id == offer.offer_id)
                        .ok_or_else(|| ExchangeError::UnknownOffer(offer.offer_id.clone()))?;
                    resting.price = price;
                    resting.amount = amount;
                    receipt.modified += 1;
                }
                MutationIntent::Delete { offer } => {
                    debug!("[paper:{}] delete {}", side, offer.offer_id);
                    let before = book.len();
                    book.retain(|o| o.offer_id != offer.offer_id);
                    if book.len() == before {
                        return Err(ExchangeError::UnknownOffer(offer.offer_id));
                    }
                    receipt.deleted += 1;
                }
            }
        }

        inner.next_id = next_id;
        *inner.book_mut(side) = book;
        inner.sort_book(side);
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_assigns_ids_and_orders_book() {
        let exchange = PaperExchange::new(1000.0, 1000.0);
        exchange
            .submit(
                Side::Sell,
                vec![
                    MutationIntent::Create {
                        price: 1.05,
                        amount: 150.0,
                    },
                    MutationIntent::Create {
                        price: 1.02,
                        amount: 100.0,
                    },
                ],
            )
            .await
            .unwrap();

        let offers = exchange.open_offers(Side::Sell).await.unwrap();
        // Depth order for sells: ascending price.
        assert_eq!(offers.len(), 2);
        assert_eq!(offers[0].price, 1.02);
        assert_eq!(offers[1].price, 1.05);
        assert_ne!(offers[0].offer_id, offers[1].offer_id);
    }

    #[tokio::test]
    async fn test_buy_book_is_descending() {
        let exchange = PaperExchange::new(1000.0, 1000.0);
        exchange
            .submit(
                Side::Buy,
                vec![
                    MutationIntent::Create {
                        price: 0.95,
                        amount: 10.0,
                    },
                    MutationIntent::Create {
                        price: 0.98,
                        amount: 10.0,
                    },
                ],
            )
            .await
            .unwrap();

        let offers = exchange.open_offers(Side::Buy).await.unwrap();
        assert_eq!(offers[0].price, 0.98);
        assert_eq!(offers[1].price, 0.95);
    }

    #[tokio::test]
    async fn test_modify_and_delete() {
        let exchange = PaperExchange::new(1000.0, 1000.0);
        exchange
            .submit(
                Side::Sell,
                vec![MutationIntent::Create {
                    price: 1.05,
                    amount: 150.0,
                }],
            )
            .await
            .unwrap();
        let offer = exchange.open_offers(Side::Sell).await.unwrap()[0].clone();

        let receipt = exchange
            .submit(
                Side::Sell,
                vec![MutationIntent::Modify {
                    offer: offer.clone(),
                    price: 1.06,
                    amount: 140.0,
                }],
            )
            .await
            .unwrap();
        assert_eq!(receipt.modified, 1);

        let updated = exchange.open_offers(Side::Sell).await.unwrap()[0].clone();
        assert_eq!(updated.offer_id, offer.offer_id);
        assert_eq!(updated.price, 1.06);
        assert_eq!(updated.amount, 140.0);

        exchange
            .submit(Side::Sell, vec![MutationIntent::Delete { offer: updated }])
            .await
            .unwrap();
        assert_eq!(exchange.open_offer_count(Side::Sell), 0);
    }

    #[tokio::test]
    async fn test_bad_batch_leaves_book_untouched() {
        let exchange = PaperExchange::new(1000.0, 1000.0);
        exchange
            .submit(
                Side::Sell,
                vec![MutationIntent::Create {
                    price: 1.05,
                    amount: 150.0,
                }],
            )
            .await
            .unwrap();

        let err = exchange
            .submit(
                Side::Sell,
                vec![
                    MutationIntent::Create {
                        price: 1.10,
                        amount: 10.0,
                    },
                    MutationIntent::Delete {
                        offer: LiveOffer::new("ghost", 1.0, 1.0),
                    },
                ],
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ExchangeError::UnknownOffer(id) if id == "ghost"));
        // The create in the same batch was not applied either.
        assert_eq!(exchange.open_offer_count(Side::Sell), 1);
    }

    #[tokio::test]
    async fn test_sides_are_independent() {
        let exchange = PaperExchange::new(1000.0, 1000.0);
        exchange
            .submit(
                Side::Sell,
                vec![MutationIntent::Create {
                    price: 1.05,
                    amount: 1.0,
                }],
            )
            .await
            .unwrap();

        assert_eq!(exchange.open_offer_count(Side::Sell), 1);
        assert_eq!(exchange.open_offer_count(Side::Buy), 0);
    }
}
