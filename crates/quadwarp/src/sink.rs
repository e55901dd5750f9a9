use std::io::{Cursor, Read};

/// A one-shot producer of a reader over an encoded image.
///
/// The producer owns its bytes, so it can be called whenever the consumer is ready.
pub type StreamProducer = Box<dyn FnOnce() -> Box<dyn Read + Send> + Send>;

/// A component that displays encoded images, e.g. an image widget.
///
/// [`distort`](crate::distort) hands the sink a [`StreamProducer`] and never waits for it to
/// be consumed.
pub trait DisplaySink {
    /// Replace the source of the displayed image.
    fn set_source(&mut self, producer: StreamProducer);
}

/// Build a producer over a copy of `bytes`.
pub fn producer_from_bytes(bytes: Vec<u8>) -> StreamProducer {
    Box::new(move || Box::new(Cursor::new(bytes)) as Box<dyn Read + Send>)
}

/// A sink that keeps the latest producer until someone takes it.
#[derive(Default)]
pub struct ImageSlot {
    source: Option<StreamProducer>,
}

impl ImageSlot {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a source is waiting to be read.
    pub fn has_source(&self) -> bool {
        self.source.is_some()
    }

    /// Take the pending producer, if any.
    pub fn take_source(&mut self) -> Option<StreamProducer> {
        self.source.take()
    }

    /// Take the pending producer and read it to the end.
    pub fn read_source(&mut self) -> std::io::Result<Option<Vec<u8>>> {
        let Some(producer) = self.source.take() else {
            return Ok(None);
        };

        let mut buf = Vec::new();
        producer().read_to_end(&mut buf)?;
        Ok(Some(buf))
    }
}

impl DisplaySink for ImageSlot {
    fn set_source(&mut self, producer: StreamProducer) {
        self.source = Some(producer);
    }
}

impl std::fmt::Debug for ImageSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("ImageSlot")
            .field("has_source", &self.has_source())
            .finish()
    }
}
