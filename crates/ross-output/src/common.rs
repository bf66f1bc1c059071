//! Small helpers shared by the XML writers.

use std::io::Write;

use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

use crate::error::Result;

/// Write `<name>text</name>`; an empty `text` still yields an open/close pair.
pub fn write_text_element<W: Write>(writer: &mut Writer<W>, name: &str, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

pub fn start<W: Write>(writer: &mut Writer<W>, name: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    Ok(())
}

pub fn end<W: Write>(writer: &mut Writer<W>, name: &str) -> Result<()> {
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

pub fn empty<W: Write>(writer: &mut Writer<W>, name: &str) -> Result<()> {
    writer.write_event(Event::Empty(BytesStart::new(name)))?;
    Ok(())
}
