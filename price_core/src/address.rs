/// Returns true when `address` is syntactically a valid Solana address,
/// i.e. base58 text that decodes to exactly 32 bytes.
pub fn is_valid_token_address(address: &str) -> bool {
    match bs58::decode(address).into_vec() {
        Ok(bytes) => bytes.len() == 32,
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SOL_MINT;

    #[test]
    fn accepts_known_mints() {
        assert!(is_valid_token_address(SOL_MINT));
        // USDC
        assert!(is_valid_token_address(
            "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v"
        ));
    }

    #[test]
    fn rejects_empty_string() {
        assert!(!is_valid_token_address(""));
    }

    #[test]
    fn rejects_non_base58_text() {
        // '0', 'O', 'I' and 'l' are outside the base58 alphabet
        assert!(!is_valid_token_address("0OIl0OIl0OIl0OIl0OIl0OIl0OIl0OIl"));
        assert!(!is_valid_token_address("not a mint"));
    }

    #[test]
    fn rejects_wrong_length() {
        // decodes fine but to far fewer than 32 bytes
        assert!(!is_valid_token_address("abc"));
        assert!(!is_valid_token_address("EPjFWdd5AufqSSqeM2qN"));
        // one character past a full pubkey decodes to 33 bytes
        assert!(!is_valid_token_address(
            "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1vv"
        ));
    }
}
