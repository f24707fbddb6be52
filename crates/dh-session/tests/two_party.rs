//! End-to-end two-party exchanges

use dh_core::{find_generators, primes_up_to};
use dh_crypto::{decrypt, encode, encrypt, public_key, shared_secret};
use dh_session::{Session, SessionConfig, SessionError, SessionState};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn quiet_config() -> SessionConfig {
    SessionConfig::builder().pause_ms(0).build().unwrap()
}

#[test]
fn every_generator_and_key_pair_agrees() {
    for p in [5u64, 7, 11, 13] {
        for g in find_generators(p).unwrap() {
            for a in -(p as i64)..p as i64 {
                for b in 1..p as i64 {
                    let mut session = Session::new(quiet_config());
                    session.agree_prime(p).unwrap();
                    session.choose_generator(g).unwrap();
                    session.add_party("a", a).unwrap();
                    session.add_party("b", b).unwrap();

                    let secret = session.establish().unwrap();
                    assert_eq!(
                        secret.value(),
                        shared_secret(public_key(g, a, p), b, p)
                    );
                }
            }
        }
    }
}

#[test]
fn message_survives_the_exchange() {
    let mut rng = StdRng::seed_from_u64(2024);
    let message = "The eagle lands at dawn. Ünïcødé too: λ→∞";

    for p in primes_up_to(200).filter(|&p| p > 3) {
        let mut session = Session::new(quiet_config());
        let g = session.agree_prime(p).unwrap()[0];
        session.choose_generator(g).unwrap();
        session.add_random_party("alice", &mut rng).unwrap();
        session.add_random_party("bob", &mut rng).unwrap();
        session.establish().unwrap();

        let sent = session.send("alice", message).unwrap();
        assert_eq!(sent.codes, encode(message));

        let received = session.receive("bob", &sent.encrypted).unwrap();
        assert_eq!(received.text.as_deref(), Some(message), "p={}", p);
    }
}

#[test]
fn free_functions_match_session() {
    let mut session = Session::new(quiet_config());
    session.agree_prime(11).unwrap();
    session.choose_generator(2).unwrap();
    session.add_party("alice", 3).unwrap();
    session.add_party("bob", 4).unwrap();
    let secret = session.establish().unwrap().value();

    let sent = session.send("alice", "AB").unwrap();
    assert_eq!(sent.encrypted, encrypt(secret, &encode("AB"), 11));
    assert_eq!(decrypt(secret, &sent.encrypted, 11), vec![65, 66]);
}

#[test]
fn retry_after_rejected_inputs() {
    let mut session = Session::new(quiet_config());

    for bad in [0u64, 1, 4, 100] {
        let err = session.agree_prime(bad).unwrap_err();
        assert!(err.is_retryable());
    }
    assert_eq!(session.state(), SessionState::Initial);

    session.agree_prime(13).unwrap();
    assert!(matches!(
        session.choose_generator(3),
        Err(SessionError::Crypto(_))
    ));
    session.choose_generator(6).unwrap();
    assert_eq!(session.state(), SessionState::ParamsAgreed);
}

#[test]
fn prime_two_offers_no_generators() {
    let mut session = Session::new(quiet_config());
    assert!(matches!(
        session.agree_prime(2),
        Err(SessionError::NoGenerators(2))
    ));
    assert_eq!(session.state(), SessionState::Initial);
    assert!(session.choose_generator(1).is_err());

    assert_eq!(session.agree_prime(3).unwrap(), &[2]);
    assert_eq!(session.choose_generator(2).unwrap().generator(), 2);
}
