// Integration tests for viewports, the window registry and selection lists

use crossterm::event::MouseButton;
use varpane::host::demo::DemoHost;
use varpane::host::Host;
use varpane::ui::ansi::{clip_columns, strip};
use varpane::ui::clipboard::MemoryClipboard;
use varpane::ui::diff::SELECTED;
use varpane::ui::panes::{frames_window, locals_window, threads_window, CommandWindow, MemoryWindow};
use varpane::ui::region::{PaneRegion, Region};
use varpane::ui::registry::WindowRegistry;
use varpane::ui::viewport::Viewport;
use varpane::ui::window::{ClickOutcome, Window};

fn pane(width: usize, height: usize) -> (PaneRegion, Viewport) {
    let region = PaneRegion::new(width, height);
    (region.clone(), Viewport::attach(region))
}

fn plain_rows(region: &PaneRegion) -> Vec<String> {
    region
        .rows()
        .iter()
        .map(|r| strip(r).trim_end().to_string())
        .collect()
}

#[test]
fn test_viewport_clamps_offset_to_fill_the_window() {
    let (region, mut viewport) = pane(20, 3);
    viewport.set_lines((0..5).map(|i| format!("line{}", i)).collect());
    viewport.set_line_offset(4);
    viewport.paint();
    assert_eq!(viewport.line_offset(), 2);
    assert_eq!(plain_rows(&region), vec!["line2", "line3", "line4"]);
}

#[test]
fn test_column_clip_reemits_open_color() {
    let line = "\x1b[1;32m0123456789\x1b[0m";
    assert_eq!(clip_columns(line, 5, 3), "\x1b[1;32m567\x1b[0m");
}

#[test]
fn test_horizontal_scroll_clips_every_row() {
    let (region, mut viewport) = pane(4, 2);
    viewport.set_lines(vec!["abcdefgh".into(), "\x1b[31mxy\x1b[0m".into()]);
    viewport.scroll_horizontal(2);
    assert_eq!(plain_rows(&region), vec!["cdef", ""]);
    assert_eq!(region.rows()[1], "\x1b[0m    ");
}

#[test]
fn test_refresh_all_skips_closed_windows() {
    let host = DemoHost::new();
    let mut registry = WindowRegistry::new();
    let (locals_region, viewport) = pane(60, 20);
    registry.register(Box::new(locals_window(viewport)));
    let (threads_region, viewport) = pane(60, 5);
    registry.register(Box::new(threads_window(viewport)));

    assert_eq!(registry.refresh_all(&host), 2);
    let writes = locals_region.write_count();
    threads_region.close();
    assert_eq!(registry.refresh_all(&host), 1);
    assert_eq!(locals_region.write_count(), writes + 1);
    assert!(threads_region.rows().is_empty());
}

#[test]
fn test_selecting_a_frame_refreshes_every_window() {
    let mut host = DemoHost::new();
    let mut registry = WindowRegistry::new();
    let (frames_region, viewport) = pane(40, 5);
    registry.register(Box::new(frames_window(viewport)));
    let (locals_region, viewport) = pane(60, 20);
    registry.register(Box::new(locals_window(viewport)));
    registry.refresh_all(&host);
    assert_eq!(plain_rows(&frames_region), vec!["#0  process", "#1  main"]);

    let mut clipboard = MemoryClipboard::default();
    let outcome = registry.click("frames", &mut host, &mut clipboard, 2, 1, MouseButton::Left);
    assert_eq!(outcome, ClickOutcome::RefreshAll);
    assert!(frames_region.rows()[1].contains(&format!("{}main", SELECTED)));
    let locals = plain_rows(&locals_region);
    assert_eq!(locals[0], "  argc = 1");
    assert!(locals.contains(&"  status = <Cannot access memory at address 0x8>".to_string()));
}

#[test]
fn test_click_below_the_list_does_nothing() {
    let mut host = DemoHost::new();
    let mut registry = WindowRegistry::new();
    let (_, viewport) = pane(40, 10);
    registry.register(Box::new(threads_window(viewport)));
    registry.refresh_all(&host);
    let mut clipboard = MemoryClipboard::default();
    let outcome = registry.click("threads", &mut host, &mut clipboard, 0, 5, MouseButton::Left);
    assert_eq!(outcome, ClickOutcome::Ignored);
    assert_eq!(host.threads().iter().find(|t| t.selected).map(|t| t.num), Some(1));
}

#[test]
fn test_memory_window_follows_pinned_local() {
    let mut host = DemoHost::new();
    let mut clipboard = MemoryClipboard::default();
    let (_, viewport) = pane(80, 20);
    let mut locals = locals_window(viewport);
    locals.refill(&host);
    let line = locals.line_of("greeting").unwrap();
    // pins the pointer variable itself, not its target
    locals.click_line(&mut host, &mut clipboard, line, MouseButton::Right);

    let (region, viewport) = pane(80, 2);
    let mut memory = MemoryWindow::new(viewport);
    assert!(memory.follow_slot(&host, "lv"));
    memory.refill(&host);
    memory.redraw();
    assert_eq!(memory.pointer(), 0x7fc8);
    assert_eq!(plain_rows(&region), vec!["Cannot access memory at address 0x7fc8"]);

    memory.set_pointer(0x1080);
    memory.refill(&host);
    memory.redraw();
    let rows = plain_rows(&region);
    assert_eq!(rows.len(), 2);
    assert!(rows[0].starts_with("0x0000000000001080  6865 6c6c 6f2c 2077"));
    assert!(rows[0].ends_with("hello, world...."));
}

#[test]
fn test_memory_scroll_through_registry() {
    let host = DemoHost::new();
    let mut registry = WindowRegistry::new();
    let (region, viewport) = pane(80, 1);
    let mut memory = MemoryWindow::new(viewport);
    memory.set_pointer(0x1000);
    registry.register(Box::new(memory));
    registry.refresh_all(&host);
    registry.scroll("memory", &host, 2, 0);
    assert!(region.rows()[0].starts_with("0x0000000000001020"));
    let memory = registry.downcast_mut::<MemoryWindow>("memory").unwrap();
    assert_eq!(memory.pointer(), 0x1020);
}

#[test]
fn test_command_window_reruns_commands() {
    let mut host = DemoHost::new();
    let (region, viewport) = pane(80, 10);
    let mut registers = CommandWindow::new("registers", "info registers\nbogus", viewport);
    registers.refill(&host);
    registers.redraw();
    let first = plain_rows(&region);
    assert!(first[0].starts_with("rax            0x0"));
    assert_eq!(first.last().map(String::as_str), Some("Undefined command: \"bogus\"."));
    assert_eq!(region.title(), "registers");

    host.step();
    registers.refill(&host);
    registers.redraw();
    assert!(plain_rows(&region)[0].starts_with("rax            0x1"));
}
