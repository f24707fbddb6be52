//! Interactive Exchange
//!
//! Walks two named parties through the exchange, narrating each step.

use std::io::{self, BufRead, Write};

use dh_crypto::CryptoError;
use dh_session::{Session, SessionConfig, SessionError};
use rand::Rng;
use thiserror::Error;
use tracing::debug;

use crate::prompt::Prompter;

/// Errors that end the demo
#[derive(Error, Debug)]
pub enum DemoError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Result type for the demo
pub type DemoResult<T> = Result<T, DemoError>;

/// Interactive demo over a prompter
pub struct Demo<R, W> {
    prompter: Prompter<R, W>,
    session: Session,
}

impl<R: BufRead, W: Write> Demo<R, W> {
    pub fn new(config: SessionConfig, prompter: Prompter<R, W>) -> Self {
        Self {
            prompter,
            session: Session::new(config),
        }
    }

    /// Consume the demo and return its prompter
    #[cfg(test)]
    pub fn into_prompter(self) -> Prompter<R, W> {
        self.prompter
    }

    /// Run the whole exchange
    ///
    /// With `rng` set, private keys are drawn at random instead of asked for.
    pub fn run<G: Rng + ?Sized>(&mut self, mut rng: Option<&mut G>) -> DemoResult<()> {
        let sender = self.prompter.ask("Person 1's name: ")?;
        let mut receiver = self.prompter.ask("Person 2's name: ")?;
        while receiver == sender {
            receiver = self.prompter.ask("names must differ, try again: ")?;
        }

        let prime = self.agree_prime()?;
        let generator = self.choose_generator()?;

        for name in [&sender, &receiver] {
            match rng.as_deref_mut() {
                Some(rng) => {
                    self.session.add_random_party(name, rng)?;
                }
                None => self.register_party(name)?,
            }
        }

        let pause = self.session.config().pause();
        self.prompter
            .say("calculating public keys: a**(private_key) % p \n")?;
        self.prompter.pause(pause)?;

        for party in self.session.parties() {
            self.prompter.say(format!(
                "{}'s private key: {}, public key: {}",
                party.name(),
                party.keys().secret_key(),
                party.public_key()
            ))?;
        }
        self.prompter
            .ask(format!("Your shared numbers are p: {}, a: {}", prime, generator))?;

        self.prompter.say("calculating shared secret")?;
        self.prompter.pause(pause)?;

        let secret = match self.session.establish() {
            Ok(secret) => secret,
            Err(e @ SessionError::SecretMismatch { .. }) => {
                self.prompter.say("Oops, something went wrong...")?;
                return Err(e.into());
            }
            Err(e) => return Err(e.into()),
        };
        self.prompter.say(format!("shared secret is {}", secret))?;

        let question = format!("{}, what message do you want to send to {}? ", sender, receiver);
        let mut text = self.prompter.ask(&question)?;
        let sent = loop {
            match self.session.send(&sender, &text) {
                Ok(sent) => break sent,
                Err(e @ SessionError::MessageTooLong { .. }) => {
                    text = self.prompter.ask(format!("{}, try again: ", e))?;
                }
                Err(e) => return Err(e.into()),
            }
        };

        self.prompter.say(format!("{:?}", sent.codes))?;
        self.prompter
            .say("now encrypting message (each letter individually)")?;
        self.prompter.say(format!("{:?}", sent.encrypted))?;

        let received = self.session.receive(&receiver, &sent.encrypted)?;
        self.prompter
            .say(format!("{} decrypts: {:?}", receiver, received.codes))?;
        match received.text {
            Some(text) => self.prompter.say(format!("{} reads: {}", receiver, text))?,
            None => self
                .prompter
                .say(format!("{} could not decode the message", receiver))?,
        }

        Ok(())
    }

    fn agree_prime(&mut self) -> DemoResult<u64> {
        const RETRY: &str = "that's not a number, try again: ";
        let mut prime: u64 = self
            .prompter
            .ask_parsed("choose a shared prime number: ", RETRY)?;

        loop {
            let rejection = match self.session.agree_prime(prime) {
                Ok(_) => None,
                Err(SessionError::Crypto(CryptoError::NotPrime(_))) => {
                    Some("that's not prime, try again: ".to_string())
                }
                Err(SessionError::PrimeTooLarge { max, .. }) => {
                    Some(format!("that prime is above {}, try again: ", max))
                }
                Err(e @ SessionError::NoGenerators(_)) => Some(format!("{}, try again: ", e)),
                Err(e) => return Err(e.into()),
            };

            match rejection {
                Some(retry) => {
                    debug!(prime, "prime rejected");
                    prime = self.prompter.ask_parsed(retry, RETRY)?;
                }
                None => return Ok(prime),
            }
        }
    }

    fn choose_generator(&mut self) -> DemoResult<u64> {
        let question = format!(
            "select a shared generator from the list {:?}: ",
            self.session.generators()
        );
        let retry = "that's not in the list, try again: ";
        let mut generator: u64 = self.prompter.ask_parsed(question, retry)?;

        loop {
            match self.session.choose_generator(generator) {
                Ok(params) => return Ok(params.generator()),
                Err(SessionError::Crypto(CryptoError::InvalidGenerator { .. })) => {
                    generator = self.prompter.ask_parsed(retry, retry)?;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn register_party(&mut self, name: &str) -> DemoResult<()> {
        let retry = "that's not a valid private key, try again: ";
        let mut key: i64 = self
            .prompter
            .ask_parsed(format!("{} select a private key: ", name), retry)?;

        loop {
            match self.session.add_party(name, key) {
                Ok(_) => return Ok(()),
                Err(e @ SessionError::Crypto(CryptoError::InvalidPrivateKey { .. })) => {
                    key = self.prompter.ask_parsed(format!("{}, try again: ", e), retry)?;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}
