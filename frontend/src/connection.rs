use futures::stream::Stream;
use shared::{DownMsg, UpMsg};
use zoon::*;

/// Actor+Relay compatible Connection adapter
pub struct ConnectionAdapter {
    connection: Connection<UpMsg, DownMsg>,
}

impl ConnectionAdapter {
    pub fn new() -> (Self, impl Stream<Item = DownMsg>) {
        let (message_sender, message_stream) = futures::channel::mpsc::unbounded();

        let connection = Connection::new(move |down_msg, _| {
            debug_log!(crate::DEBUG_CONTENT, "DownMsg received: {:?}", down_msg);
            let _ = message_sender.unbounded_send(down_msg);
        });

        (Self { connection }, message_stream)
    }

    pub async fn send_up_msg(&self, up_msg: UpMsg) {
        if let Err(error) = self.connection.send_up_msg(up_msg).await {
            zoon::eprintln!("Failed to send message: {:?}", error);
        }
    }
}
