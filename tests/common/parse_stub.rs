use lineage::areas::parse_service::{ParseRequest, ParseResponse, WireNode};
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;

/// In-process stand-in for the parse service
///
/// Answers every request with a flat tree: one leaf per whitespace-separated
/// token under a `file` root, spans in byte offsets. Content containing the
/// `PARSE_ERROR` marker gets an error reply instead. The listener thread
/// lives until the test process exits.
pub struct ParseStub {
    endpoint: String,
}

impl ParseStub {
    pub fn spawn() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub");
        let endpoint = listener.local_addr().expect("stub addr").to_string();

        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { continue };
                thread::spawn(|| handle(stream));
            }
        });

        ParseStub { endpoint }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn handle(mut stream: TcpStream) {
    let Ok(payload) = read_frame(&mut stream) else {
        return;
    };
    let Ok(request) = serde_json::from_slice::<ParseRequest>(&payload) else {
        return;
    };

    let response = if request.content.contains("PARSE_ERROR") {
        ParseResponse::Error {
            message: format!("cannot parse {}", request.path),
        }
    } else {
        ParseResponse::Ok {
            root: token_tree(&request.content),
        }
    };

    let payload = serde_json::to_vec(&response).expect("serialize reply");
    let _ = write_frame(&mut stream, &payload);
}

fn read_frame(stream: &mut TcpStream) -> std::io::Result<Vec<u8>> {
    let mut len = [0u8; 4];
    stream.read_exact(&mut len)?;
    let mut payload = vec![0; u32::from_be_bytes(len) as usize];
    stream.read_exact(&mut payload)?;
    Ok(payload)
}

fn write_frame(stream: &mut TcpStream, payload: &[u8]) -> std::io::Result<()> {
    stream.write_all(&(payload.len() as u32).to_be_bytes())?;
    stream.write_all(payload)?;
    Ok(())
}

fn token_tree(content: &str) -> WireNode {
    let bytes = content.as_bytes();
    let mut children = Vec::new();
    let mut index = 0;
    while index < bytes.len() {
        if bytes[index].is_ascii_whitespace() {
            index += 1;
            continue;
        }
        let start = index;
        while index < bytes.len() && !bytes[index].is_ascii_whitespace() {
            index += 1;
        }
        children.push(WireNode {
            label: content[start..index].to_string(),
            start,
            end: index,
            children: Vec::new(),
        });
    }

    WireNode {
        label: "file".to_string(),
        start: 0,
        end: content.len(),
        children,
    }
}
