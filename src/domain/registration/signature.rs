//! Razorpay payment signature verification.
//!
//! Checkout reports `razorpay_signature = hex(HMAC-SHA256(order_id + "|" +
//! payment_id, key_secret))`. A matching signature proves the payment result
//! came from the gateway and was not forged by the client.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Separator between order id and payment id in the signed message.
pub const SIGNATURE_SEPARATOR: char = '|';

/// Computes the lowercase hex signature the gateway issues for a payment.
pub fn compute_payment_signature(order_id: &str, payment_id: &str, secret: &SecretString) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.expose_secret().as_bytes())
        .expect("HMAC can take key of any size");

    mac.update(order_id.as_bytes());
    mac.update(&[SIGNATURE_SEPARATOR as u8]);
    mac.update(payment_id.as_bytes());

    hex::encode(mac.finalize().into_bytes())
}

/// Returns true only if `provided` is exactly the expected signature.
///
/// The comparison runs in constant time over the hex strings.
pub fn verify_payment_signature(
    order_id: &str,
    payment_id: &str,
    secret: &SecretString,
    provided: &str,
) -> bool {
    let expected = compute_payment_signature(order_id, payment_id, secret);
    expected.as_bytes().ct_eq(provided.as_bytes()).into()
}

/// Verifier bound to the gateway's shared secret.
///
/// Built once at startup from configuration; the secret never leaves it.
#[derive(Clone)]
pub struct PaymentSignatureVerifier {
    secret: SecretString,
}

impl PaymentSignatureVerifier {
    pub fn new(secret: SecretString) -> Self {
        Self { secret }
    }

    pub fn verify(&self, order_id: &str, payment_id: &str, signature: &str) -> bool {
        verify_payment_signature(order_id, payment_id, &self.secret, signature)
    }

    /// Signature the gateway would produce. Used by the mock gateway and tests.
    pub fn sign(&self, order_id: &str, payment_id: &str) -> String {
        compute_payment_signature(order_id, payment_id, &self.secret)
    }
}

impl std::fmt::Debug for PaymentSignatureVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentSignatureVerifier")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const KNOWN_SIGNATURE: &str =
        "070ea2f5813be979e4d4dd50f9840717bb01adf600c92662f401086c6cabbf9a";

    fn secret() -> SecretString {
        SecretString::new("s3cr3t".to_string())
    }

    #[test]
    fn computes_known_signature() {
        let sig = compute_payment_signature("order_abc", "pay_123", &secret());
        assert_eq!(sig, KNOWN_SIGNATURE);
    }

    #[test]
    fn computation_is_deterministic() {
        let a = compute_payment_signature("order_abc", "pay_123", &secret());
        let b = compute_payment_signature("order_abc", "pay_123", &secret());
        assert_eq!(a, b);
    }

    #[test]
    fn verifies_known_signature() {
        assert!(verify_payment_signature(
            "order_abc",
            "pay_123",
            &secret(),
            KNOWN_SIGNATURE
        ));
    }

    #[test]
    fn rejects_uppercase_hex() {
        let upper = KNOWN_SIGNATURE.to_uppercase();
        assert!(!verify_payment_signature("order_abc", "pay_123", &secret(), &upper));
    }

    #[test]
    fn rejects_truncated_signature() {
        let truncated = &KNOWN_SIGNATURE[..KNOWN_SIGNATURE.len() - 1];
        assert!(!verify_payment_signature("order_abc", "pay_123", &secret(), truncated));
    }

    #[test]
    fn rejects_empty_signature() {
        assert!(!verify_payment_signature("order_abc", "pay_123", &secret(), ""));
    }

    #[test]
    fn rejects_swapped_identifiers() {
        assert!(!verify_payment_signature(
            "pay_123",
            "order_abc",
            &secret(),
            KNOWN_SIGNATURE
        ));
    }

    #[test]
    fn rejects_other_secret() {
        let other = SecretString::new("not-the-secret".to_string());
        assert!(!verify_payment_signature("order_abc", "pay_123", &other, KNOWN_SIGNATURE));
    }

    #[test]
    fn verifier_signs_and_verifies() {
        let verifier = PaymentSignatureVerifier::new(secret());
        let sig = verifier.sign("order_abc", "pay_123");
        assert_eq!(sig, KNOWN_SIGNATURE);
        assert!(verifier.verify("order_abc", "pay_123", &sig));
    }

    #[test]
    fn verifier_debug_redacts_secret() {
        let verifier = PaymentSignatureVerifier::new(secret());
        let debug = format!("{:?}", verifier);
        assert!(!debug.contains("s3cr3t"));
    }

    proptest! {
        #[test]
        fn any_single_character_change_fails(pos in 0usize..64, replacement in "[0-9a-f]") {
            let mut chars: Vec<char> = KNOWN_SIGNATURE.chars().collect();
            let new_char = replacement.chars().next().unwrap();
            prop_assume!(chars[pos] != new_char);
            chars[pos] = new_char;
            let tampered: String = chars.into_iter().collect();

            prop_assert!(!verify_payment_signature("order_abc", "pay_123", &secret(), &tampered));
        }

        #[test]
        fn computed_signature_always_verifies(
            order_id in "order_[A-Za-z0-9]{1,20}",
            payment_id in "pay_[A-Za-z0-9]{1,20}",
        ) {
            let sig = compute_payment_signature(&order_id, &payment_id, &secret());
            prop_assert_eq!(sig.len(), 64);
            prop_assert!(verify_payment_signature(&order_id, &payment_id, &secret(), &sig));
        }
    }
}
