//! Producer and consumer sharing one region through a command queue.

use shm_command::{CommandQueue, PublicationBuffersReady, PublicationBuffersReadyData};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut region = vec![0u8; 4096];
    let mut queue = CommandQueue::new();

    // Producer side
    let mut command = PublicationBuffersReady::bind(&mut region, 128)?;
    command
        .set_channel("aeron:udp?endpoint=localhost:40123")?
        .set_log_file_name("/dev/shm/aeron/pub-7-3.log")?
        .set_correlation_id(42)?
        .set_session_id(7)?
        .set_stream_id(3)?
        .set_position_indicator_offset(16)?
        .set_mtu_length(1408)?;
    let length = command.submit(&mut queue)?;
    println!("submitted {length} bytes");

    // Consumer side
    while let Some(bytes) = queue.pop() {
        let received = PublicationBuffersReady::bind(bytes, 0)?;
        let data = PublicationBuffersReadyData::decode(&received)?;
        println!("{data:#?}");
    }

    Ok(())
}
