use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, unbounded, Receiver, Sender};
use primitives::Address;
use reputation_core::RatingReceipt;
use storage_utils::StorageError;
use telemetry::{debug, error};

use crate::{LedgerDb, LedgerDbError, LedgerDbReadHandle, LedgerDbReadHandleFactory, Result};

pub const LEDGER_WRITER_THREAD_NAME: &str = "ledger-writer";

/// Requests processed, in arrival order, by the writer thread.
#[derive(Debug)]
pub enum LedgerCommand {
    SubmitRating {
        rater: Address,
        target: Address,
        rating: u128,
        reply: Sender<Result<RatingReceipt>>,
    },

    /// Stops the writer once every command queued before it has been applied
    Shutdown,
}

/// Owns a [`LedgerDb`] on a dedicated thread and applies submissions one at
/// a time, in the order they were queued.
#[derive(Debug)]
pub struct LedgerWriter {
    sender: Sender<LedgerCommand>,
    factory: LedgerDbReadHandleFactory,
    thread: Option<JoinHandle<LedgerDb>>,
}

impl LedgerWriter {
    pub fn spawn(db: LedgerDb) -> Result<Self> {
        let (sender, receiver) = unbounded();
        let factory = db.factory();

        let thread = thread::Builder::new()
            .name(LEDGER_WRITER_THREAD_NAME.to_string())
            .spawn(move || run(db, receiver))
            .map_err(StorageError::from)?;

        Ok(Self {
            sender,
            factory,
            thread: Some(thread),
        })
    }

    pub fn handle(&self) -> LedgerWriterHandle {
        LedgerWriterHandle {
            sender: self.sender.clone(),
            factory: self.factory.clone(),
        }
    }

    pub fn factory(&self) -> LedgerDbReadHandleFactory {
        self.factory.clone()
    }

    /// Drains the queue, stops the thread and hands the ledger back.
    pub fn shutdown(mut self) -> Result<LedgerDb> {
        self.stop()
    }

    fn stop(&mut self) -> Result<LedgerDb> {
        let thread = self.thread.take().ok_or(LedgerDbError::WriterClosed)?;

        // the thread may already be gone, joining below reports that
        let _ = self.sender.send(LedgerCommand::Shutdown);

        thread
            .join()
            .map_err(|_| StorageError::Other("ledger writer thread panicked".to_string()).into())
    }
}

impl Drop for LedgerWriter {
    fn drop(&mut self) {
        if self.thread.is_some() {
            if let Err(err) = self.stop() {
                error!("failed to stop ledger writer: {err}");
            }
        }
    }
}

fn run(mut db: LedgerDb, receiver: Receiver<LedgerCommand>) -> LedgerDb {
    for command in receiver.iter() {
        match command {
            LedgerCommand::SubmitRating {
                rater,
                target,
                rating,
                reply,
            } => {
                let result = db.submit_rating(&rater, &target, rating);
                if reply.send(result).is_err() {
                    debug!("submitter went away before receiving its receipt");
                }
            },
            LedgerCommand::Shutdown => break,
        }
    }

    db
}

/// Cloneable entry point for submitting ratings and reading the ledger from
/// any thread.
#[derive(Debug, Clone)]
pub struct LedgerWriterHandle {
    sender: Sender<LedgerCommand>,
    factory: LedgerDbReadHandleFactory,
}

impl LedgerWriterHandle {
    /// Queues a submission and blocks until the writer has applied or
    /// rejected it.
    pub fn submit_rating(
        &self,
        rater: &Address,
        target: &Address,
        rating: u128,
    ) -> Result<RatingReceipt> {
        let (reply, response) = bounded(1);

        self.sender
            .send(LedgerCommand::SubmitRating {
                rater: *rater,
                target: *target,
                rating,
                reply,
            })
            .map_err(|_| LedgerDbError::WriterClosed)?;

        response.recv().map_err(|_| LedgerDbError::WriterClosed)?
    }

    pub fn read_handle(&self) -> LedgerDbReadHandle {
        self.factory.handle()
    }
}
