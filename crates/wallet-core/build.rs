fn main() {
    uniffi::generate_scaffolding("src/wallet_core.udl").expect("failed to generate UniFFI scaffolding");
}
