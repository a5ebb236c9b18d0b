//! the verification engine.
//!
//! one verification attempt moves through
//! `Received(raw) -> Decoded(token value) -> {Consumed | Rejected}`.
//! the only success path is the store's atomic consume; the engine adds
//! no retries and no provenance side effects of its own.

use veriseal_db::Database;
use veriseal_types::{RejectReason, TokenValue, VerifyOutcome};

use crate::symbol::SymbolDecoder;

/// verification engine over a token store.
#[derive(Clone)]
pub struct VerificationEngine<D> {
    db: D,
}

impl<D: Database> VerificationEngine<D> {
    /// create an engine over the given store.
    pub fn new(db: D) -> Self {
        Self { db }
    }

    /// verify a decoded payload, consuming the token on success.
    ///
    /// `None`, empty or whitespace-only input means upstream decoding
    /// found no symbol. a miss in the store is reported as
    /// `UnknownOrAlreadyUsedToken` without distinguishing never-registered
    /// from already-consumed.
    ///
    /// explicitly not idempotent: the same payload verifies `Consumed`
    /// at most once, `Rejected` ever after.
    pub async fn verify(&self, decoded: Option<&str>) -> veriseal_db::Result<VerifyOutcome> {
        let value = match decoded.map(TokenValue::new) {
            None | Some(Err(_)) => {
                return Ok(VerifyOutcome::Rejected {
                    reason: RejectReason::NoSymbolDetected,
                });
            }
            Some(Ok(value)) => value,
        };

        let Some(product_id) = self.db.consume_token(&value).await? else {
            tracing::info!(token = %value.prefix(), "verification rejected");
            return Ok(VerifyOutcome::Rejected {
                reason: RejectReason::UnknownOrAlreadyUsedToken,
            });
        };

        // the product identity outlives the token row we just removed
        let product = self.db.get_product(product_id).await?.ok_or_else(|| {
            veriseal_db::Error::InvalidInput(format!(
                "consumed token referenced missing product {}",
                product_id
            ))
        })?;

        tracing::info!(
            token = %value.prefix(),
            product_id = %product.id,
            "token verified and consumed"
        );
        Ok(VerifyOutcome::Consumed { product })
    }

    /// decode an image via the external collaborator, then verify.
    pub async fn verify_image(
        &self,
        decoder: &dyn SymbolDecoder,
        image: &[u8],
    ) -> veriseal_db::Result<VerifyOutcome> {
        let decoded = decoder.decode(image);
        self.verify(decoded.as_deref()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::stub::FixedDecoder;
    use veriseal_db::VerisealDb;
    use veriseal_types::NewProduct;

    async fn engine_with_token(value: &str) -> VerificationEngine<VerisealDb> {
        let db = VerisealDb::new_in_memory().await.unwrap();
        db.register_product(
            &NewProduct::named("Cola-500ml"),
            &TokenValue::new(value).unwrap(),
        )
        .await
        .unwrap();
        VerificationEngine::new(db)
    }

    #[tokio::test]
    async fn test_no_input_rejected_as_no_symbol() {
        let engine = engine_with_token("QR-001").await;

        for input in [None, Some(""), Some("   ")] {
            let outcome = engine.verify(input).await.unwrap();
            assert!(matches!(
                outcome,
                VerifyOutcome::Rejected {
                    reason: RejectReason::NoSymbolDetected
                }
            ));
        }

        // the short-circuit must not have touched the token
        let outcome = engine.verify(Some("QR-001")).await.unwrap();
        assert!(outcome.is_consumed());
    }

    #[tokio::test]
    async fn test_consumed_at_most_once() {
        let engine = engine_with_token("QR-001").await;

        let first = engine.verify(Some("QR-001")).await.unwrap();
        match first {
            VerifyOutcome::Consumed { product } => assert_eq!(product.name, "Cola-500ml"),
            VerifyOutcome::Rejected { .. } => panic!("first verification should consume"),
        }

        // replaying the same payload is indistinguishable from a value
        // that was never registered
        let second = engine.verify(Some("QR-001")).await.unwrap();
        assert!(matches!(
            second,
            VerifyOutcome::Rejected {
                reason: RejectReason::UnknownOrAlreadyUsedToken
            }
        ));

        let never_issued = engine.verify(Some("QR-999")).await.unwrap();
        assert!(matches!(
            never_issued,
            VerifyOutcome::Rejected {
                reason: RejectReason::UnknownOrAlreadyUsedToken
            }
        ));
    }

    #[tokio::test]
    async fn test_verify_image_through_decoder() {
        let engine = engine_with_token("QR-001").await;
        let decoder = FixedDecoder("QR-001");

        // unreadable image short-circuits
        let outcome = engine.verify_image(&decoder, &[]).await.unwrap();
        assert!(matches!(
            outcome,
            VerifyOutcome::Rejected {
                reason: RejectReason::NoSymbolDetected
            }
        ));

        // decodable image consumes the token
        let outcome = engine.verify_image(&decoder, b"fake-image").await.unwrap();
        assert!(outcome.is_consumed());
    }
}
