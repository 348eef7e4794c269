use super::store::MenuStore;
use crate::protocol::{Event, EventWriter};
use crate::ui::ClickSource;
use tokio::io::AsyncWrite;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tokio_stream::{StreamExt, StreamMap};

/// Waits on every item's click source at once and turns each click into a
/// `clicked` event.
///
/// A source that closes is dropped from the set; the multiplexer stops once
/// no sources remain. Which of several ready sources is served first is
/// unspecified.
pub struct ClickMultiplexer {
    store: MenuStore,
    sources: StreamMap<usize, UnboundedReceiverStream<()>>,
}

impl ClickMultiplexer {
    /// `sources[n]` must be the click source of sequence ID `n`.
    pub fn new(store: MenuStore, sources: Vec<ClickSource>) -> Self {
        let mut streams = StreamMap::with_capacity(sources.len());
        for (seq_id, source) in sources.into_iter().enumerate() {
            streams.insert(seq_id, UnboundedReceiverStream::new(source));
        }
        Self {
            store,
            sources: streams,
        }
    }

    /// Waits for the next click and builds its event from the item as stored
    /// at this moment. Returns `None` once every source has closed.
    pub async fn next_event(&mut self) -> Option<Event> {
        loop {
            let (seq_id, ()) = self.sources.next().await?;
            match self.store.get_item(seq_id as i64) {
                Ok(item) => return Some(Event::Clicked { item, seq_id }),
                Err(e) => log::error!("Click on unknown item: {}", e),
            }
        }
    }

    pub async fn run<W: AsyncWrite + Unpin>(mut self, mut writer: EventWriter<W>) {
        log::debug!("Watching {} click sources", self.sources.len());
        while let Some(event) = self.next_event().await {
            log::debug!("Emitting {:?}", event);
            if let Err(e) = writer.send(&event).await {
                log::error!("{}", e);
            }
        }
        log::debug!("All click sources closed");
    }
}
