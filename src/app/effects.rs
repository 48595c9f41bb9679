use std::sync::mpsc::Sender;

use crate::app::{App, Message, Model};

impl App {
    /// Start worker fetches for pending images near the viewport.
    ///
    /// The rendering side first consults the cache synchronously; only
    /// misses spawn a worker thread. Each worker fetches, decodes, writes
    /// the cache, and posts an [`Message::ImageFetched`] back to the event
    /// loop. If the app has already exited the send fails and the result is
    /// dropped, which is the entire cancellation story.
    ///
    /// Returns `true` when any image became ready synchronously (cache hit),
    /// so the caller knows to repaint.
    pub(super) fn spawn_image_fetches(model: &mut Model, tx: &Sender<Message>) -> bool {
        let mut changed = false;
        for url in model.pending_images_near_viewport() {
            if let Some(image) = model.cache.get(&url) {
                model.set_image_ready(&url, image);
                changed = true;
                continue;
            }

            model.mark_image_loading(&url);
            let tx = tx.clone();
            let cache = model.cache.clone();
            std::thread::spawn(move || {
                tracing::debug!(%url, "fetching image");
                let result = crate::image::fetch_image(&url).map_err(|err| err.to_string());
                if let Ok(image) = &result {
                    cache.put(url.clone(), image.clone());
                }
                let _ = tx.send(Message::ImageFetched { url, result });
            });
        }
        changed
    }
}
