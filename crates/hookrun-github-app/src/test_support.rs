// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use std::sync::OnceLock;

use rsa::pkcs1::EncodeRsaPublicKey;
use rsa::pkcs8::EncodePrivateKey;
use rsa::RsaPrivateKey;

use crate::jwt::AppIdentity;

pub struct TestKeyPair {
	pub private_pem: String,
	pub public_pem: String,
}

/// A 2048-bit RSA key pair generated once per test binary.
pub fn key_pair() -> &'static TestKeyPair {
	static KEYS: OnceLock<TestKeyPair> = OnceLock::new();
	KEYS.get_or_init(|| {
		let mut rng = rand::thread_rng();
		let private_key = RsaPrivateKey::new(&mut rng, 2048).expect("Failed to generate RSA key");
		let public_key = private_key.to_public_key();
		TestKeyPair {
			private_pem: private_key
				.to_pkcs8_pem(rsa::pkcs8::LineEnding::LF)
				.expect("Failed to convert private key to PEM")
				.to_string(),
			public_pem: public_key
				.to_pkcs1_pem(rsa::pkcs1::LineEnding::LF)
				.expect("Failed to convert public key to PEM"),
		}
	})
}

pub fn identity(app_id: &str) -> AppIdentity {
	AppIdentity::from_pem(app_id, key_pair().private_pem.as_bytes()).expect("test key loads")
}
