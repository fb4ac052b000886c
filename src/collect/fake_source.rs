use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use crate::collect::poller::StationSource;
use crate::collect::update_failed::UpdateFailed;

#[derive(Debug)]
enum Reply {
    Body(String),
    Stall(Duration),
    Error(UpdateFailed),
}

/// Replays queued replies in order; an exhausted queue answers with no clients.
#[derive(Debug, Default)]
pub struct FakeSource {
    replies: Mutex<VecDeque<Reply>>,
}

impl FakeSource {
    pub fn with_body(self, body: &str) -> Self {
        self.push(Reply::Body(body.to_string()))
    }

    /// Answers with no clients after `delay`.
    pub fn with_stall(self, delay: Duration) -> Self {
        self.push(Reply::Stall(delay))
    }

    pub fn with_error(self, err: UpdateFailed) -> Self {
        self.push(Reply::Error(err))
    }

    fn push(self, reply: Reply) -> Self {
        self.replies.lock().unwrap().push_back(reply);
        self
    }
}

impl StationSource for FakeSource {
    async fn fetch_stations(&self) -> Result<String, UpdateFailed> {
        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(Reply::Body(body)) => Ok(body),
            Some(Reply::Stall(delay)) => {
                tokio::time::sleep(delay).await;
                Ok(r#"{"data":[]}"#.to_string())
            }
            Some(Reply::Error(err)) => Err(err),
            None => Ok(r#"{"data":[]}"#.to_string()),
        }
    }
}
