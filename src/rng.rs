/// Random byte source for encounter generation and capture resolution.
///
/// Every random decision the core makes draws a labeled byte from one of
/// these, so tests can script the exact outcome sequence with
/// `new_for_test`. Hosts create a fresh `EncounterRng` per resolution call;
/// the pre-generated pool comfortably covers a single encounter or capture.
#[derive(Debug, Clone)]
pub struct EncounterRng {
    outcomes: Vec<u8>,
    index: usize,
}

impl EncounterRng {
    pub fn new_for_test(outcomes: Vec<u8>) -> Self {
        Self { outcomes, index: 0 }
    }

    pub fn new_random() -> Self {
        use rand::Rng;
        let mut rng = rand::rng();
        // Pre-generate enough bytes for one full capture resolution
        let outcomes: Vec<u8> = (0..64).map(|_| rng.random::<u8>()).collect();
        Self { outcomes, index: 0 }
    }

    pub fn next_outcome(&mut self, reason: &str) -> u8 {
        if self.index >= self.outcomes.len() {
            // Add the reason to the panic message for better debugging!
            panic!(
                "EncounterRng exhausted! Tried to get a value for: '{}'. Need more random values.",
                reason
            );
        }
        let outcome = self.outcomes[self.index];

        // Print the consumption event to the console during tests.
        #[cfg(test)]
        println!("[RNG] Consumed {} for: {}", outcome, reason);

        self.index += 1;
        outcome
    }
}
