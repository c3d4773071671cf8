// Generate a random signing secret for JWT_SECRET
//
// Usage: cargo run --bin generate-jwt-secret

use rand::RngCore;

fn main() {
    let mut key = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut key);
    let secret = hex::encode(key);

    println!("Generated JWT signing secret (32 bytes, hex-encoded):");
    println!();
    println!("JWT_SECRET={}", secret);
    println!();
    println!("Add this to your .env file or export it before starting the server.");
}
