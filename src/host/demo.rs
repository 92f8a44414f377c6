//! Simulated debuggee
//!
//! [`DemoHost`] pretends to be a debugger stopped in a small two-thread C++
//! program. Every [`step`](DemoHost::step) moves the program forward, so the
//! values change between refreshes the way they would while stepping a real
//! inferior. Memory is a flat 4 KiB image at [`IMAGE_BASE`]; anything
//! outside it is unreadable.
//!
//! Thread 1 is stopped in `process<int>` (called from `main`), thread 2 in
//! `worker`. The locals of `process<int>` cover every inspector strategy:
//! scalars, a char array, a linked list, a polymorphic record, a pointer to
//! pointer, a reference, an optimized-out variable and three pretty-printed
//! types (`IntVec` as an array, `Dict` as a map and `Broken`, whose printer
//! always fails).

use super::{Block, DisplayExpr, FrameInfo, FrameScope, Host, ScopeSymbol, ThreadInfo};
use crate::errors::InspectError;
use crate::inspect::custom::{PrinterRegistry, StaticChild, StaticInspector};
use crate::inspect::{CustomInspector, DisplayHint};
use crate::memory::{Address, Contents, Field, Type, Value, ValueRef};
use rustc_hash::FxHashMap;
use std::rc::Rc;
use tracing::debug;

pub const IMAGE_BASE: Address = 0x1000;
const IMAGE_LEN: usize = 0x1000;

const COUNTER: Address = 0x1000;
const NAME: Address = 0x1010;
const NODES: Address = 0x1020;
const NODE_SIZE: Address = 0x10;
const SHAPE: Address = 0x1050;
const INT_PTR: Address = 0x1060;
const GREETING: Address = 0x1080;
const VEC_DATA: Address = 0x10a0;
const ARGV: Address = 0x10c0;
const ARGV0: Address = 0x10d0;
const TEXT_BASE: Address = 0x401000;
const FRAMES_PER_THREAD: usize = 2;

const NAMES: [&str; 3] = ["alpha", "beta", "gamma"];
const GREETING_TEXT: &str = "hello, world";
const ARGV0_TEXT: &str = "./demo";

struct DemoTypes {
    int: Rc<Type>,
    char_ptr: Rc<Type>,
    void_ptr: Rc<Type>,
    node: Rc<Type>,
    node_ptr: Rc<Type>,
    shape: Rc<Type>,
    circle: Rc<Type>,
    int_vec: Rc<Type>,
    dict: Rc<Type>,
    broken: Rc<Type>,
}

impl DemoTypes {
    fn new() -> Self {
        let int = Type::int("int");
        let char_ptr = Type::pointer_to(&Type::char());
        // forward declaration, the pointee comes back with the full type
        let node_ptr = Type::pointer_to(&Type::record("Node", Vec::new()));
        let node = Type::record(
            "Node",
            vec![Field::new("value", &int), Field::new("next", &node_ptr)],
        );
        let shape = Type::record("Shape", vec![Field::new("id", &int)]);
        let circle = Type::record(
            "Circle",
            vec![Field::base_class(&shape), Field::new("radius", &int)],
        );
        let int_vec = Type::record(
            "IntVec",
            vec![
                Field::new("data", &Type::pointer_to(&int)),
                Field::new("size", &int),
            ],
        );
        let dict = Type::record(
            "Dict",
            vec![Field::new("alpha", &int), Field::new("beta", &int)],
        );
        let broken = Type::record("Broken", vec![Field::new("state", &int)]);
        DemoTypes {
            char_ptr,
            void_ptr: Type::pointer_to(&Type::void()),
            node,
            node_ptr,
            shape,
            circle,
            int_vec,
            dict,
            broken,
            int,
        }
    }
}

pub struct DemoHost {
    step: u64,
    selected_thread: u32,
    selected_frame: usize,
    types: DemoTypes,
    printers: PrinterRegistry,
    convenience: FxHashMap<String, ValueRef>,
    displays: Vec<DisplayExpr>,
}

impl Default for DemoHost {
    fn default() -> Self {
        Self::new()
    }
}

impl DemoHost {
    pub fn new() -> Self {
        DemoHost {
            step: 0,
            selected_thread: 1,
            selected_frame: 0,
            types: DemoTypes::new(),
            printers: demo_printers(),
            convenience: FxHashMap::default(),
            displays: demo_displays(),
        }
    }

    /// Advance the program by one statement
    pub fn step(&mut self) {
        self.step += 1;
        debug!(step = self.step, "demo program stepped");
    }

    pub fn steps(&self) -> u64 {
        self.step
    }

    pub fn printers_mut(&mut self) -> &mut PrinterRegistry {
        &mut self.printers
    }

    pub fn displays_mut(&mut self) -> &mut Vec<DisplayExpr> {
        &mut self.displays
    }

    fn counter(&self) -> i64 {
        self.step as i64
    }

    fn node_values(&self) -> [i64; 3] {
        let s = self.step as i64;
        [10 + s, 20, 30 + 2 * (s / 2)]
    }

    fn radius(&self) -> i64 {
        5 + (self.step as i64 % 4)
    }

    fn vec_len(&self) -> usize {
        3 + (self.step as usize % 3)
    }

    fn name_text(&self) -> &'static str {
        NAMES[self.step as usize % NAMES.len()]
    }

    fn pc(&self, thread: u32) -> Address {
        match thread {
            1 => TEXT_BASE + 0x136 + (self.step % 8) * 4,
            _ => TEXT_BASE + 0x840 + (self.step % 3) * 4,
        }
    }

    /// The whole memory image for the current step
    fn image(&self) -> Vec<u8> {
        let mut image = vec![0u8; IMAGE_LEN];
        let mut put = |address: Address, bytes: &[u8]| {
            let start = (address - IMAGE_BASE) as usize;
            image[start..start + bytes.len()].copy_from_slice(bytes);
        };
        put(COUNTER, &(self.counter() as i32).to_le_bytes());
        put(NAME, self.name_text().as_bytes());
        for (i, value) in self.node_values().iter().enumerate() {
            let at = NODES + i as Address * NODE_SIZE;
            put(at, &(*value as i32).to_le_bytes());
            let next = if i < 2 { at + NODE_SIZE } else { 0 };
            put(at + 8, &next.to_le_bytes());
        }
        put(SHAPE, &7i32.to_le_bytes());
        put(SHAPE + 4, &(self.radius() as i32).to_le_bytes());
        put(INT_PTR, &COUNTER.to_le_bytes());
        put(GREETING, GREETING_TEXT.as_bytes());
        for i in 0..self.vec_len() {
            let n = (i as i32 + 1) * (self.step as i32 + 1);
            put(VEC_DATA + 4 * i as Address, &n.to_le_bytes());
        }
        put(ARGV, &ARGV0.to_le_bytes());
        put(ARGV0, ARGV0_TEXT.as_bytes());
        image
    }

    fn node(&self, index: usize) -> Value {
        let t = &self.types;
        let at = NODES + index as Address * NODE_SIZE;
        let next = if index < 2 { at + NODE_SIZE } else { 0 };
        Value::new(
            &t.node,
            Contents::Struct(vec![
                Value::int(&t.int, self.node_values()[index]).at(at),
                Value::pointer(&t.node_ptr, next).at(at + 8),
            ]),
        )
        .at(at)
    }

    fn circle(&self) -> Value {
        let t = &self.types;
        let base = Value::new(
            &t.shape,
            Contents::Struct(vec![Value::int(&t.int, 7).at(SHAPE)]),
        )
        .at(SHAPE);
        Value::new(
            &t.circle,
            Contents::Struct(vec![
                base,
                Value::int(&t.int, self.radius()).at(SHAPE + 4),
            ]),
        )
        .at(SHAPE)
    }

    /// The object stored at `address`, typed as the program sees it
    fn object_at(&self, address: Address) -> Option<Value> {
        let t = &self.types;
        let node_index = (NODES..NODES + 3 * NODE_SIZE)
            .contains(&address)
            .then(|| ((address - NODES) / NODE_SIZE) as usize)
            .filter(|i| NODES + *i as Address * NODE_SIZE == address);
        if let Some(index) = node_index {
            return Some(self.node(index));
        }
        match address {
            COUNTER => Some(Value::int(&t.int, self.counter()).at(COUNTER)),
            SHAPE => {
                let circle = self.circle();
                let shape = circle.field(0).cloned()?;
                Some(shape.with_dynamic(circle))
            }
            INT_PTR => Some(Value::pointer(&Type::pointer_to(&t.int), COUNTER).at(INT_PTR)),
            VEC_DATA => Some(Value::int(&t.int, self.step as i64 + 1).at(VEC_DATA)),
            ARGV => Some(Value::pointer(&t.char_ptr, ARGV0).at(ARGV)),
            _ => None,
        }
    }

    fn read_c_string(&self, address: Address) -> Result<String, InspectError> {
        let image = self.image();
        let start = image_offset(address, 1)?;
        let bytes: Vec<u8> = image[start..].iter().take_while(|b| **b != 0).copied().collect();
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn process_scope(&self) -> FrameScope {
        let t = &self.types;
        let line = 40 + (self.step % 6) as u32;
        let local = |name: &str, line: u32, value: Value| ScopeSymbol {
            name: name.to_string(),
            is_argument: false,
            line,
            value: Ok(value),
        };
        let inner = Block {
            symbols: vec![local(
                "i",
                41,
                Value::int(&t.int, self.step as i64 % 3).at(0x7ff0),
            )],
            ..Block::default()
        };
        let counter = Value::int(&t.int, self.counter()).at(COUNTER);
        let body = Block {
            symbols: vec![
                ScopeSymbol {
                    name: "n".to_string(),
                    is_argument: true,
                    line: 30,
                    value: Ok(Value::int(&t.int, 3).at(0x7ff8)),
                },
                local("counter", 31, counter.clone()),
                local(
                    "name",
                    32,
                    Value::c_string(self.name_text(), 8).at(NAME),
                ),
                local("list", 33, Value::pointer(&t.node_ptr, NODES).at(0x7fe0)),
                local(
                    "shape",
                    34,
                    Value::pointer(&Type::pointer_to(&t.shape), SHAPE).at(0x7fd8),
                ),
                local(
                    "pp",
                    35,
                    Value::pointer(&Type::pointer_to(&Type::pointer_to(&t.int)), INT_PTR)
                        .at(0x7fd0),
                ),
                local(
                    "ref",
                    35,
                    Value::new(
                        &Type::reference_to(&t.int),
                        Contents::Reference(Box::new(counter)),
                    ),
                ),
                local("greeting", 36, Value::pointer(&t.char_ptr, GREETING).at(0x7fc8)),
                local("raw", 36, Value::pointer(&t.void_ptr, GREETING).at(0x7fc0)),
                local("opt", 37, Value::optimized_out(&t.int)),
                local(
                    "numbers",
                    38,
                    Value::new(
                        &t.int_vec,
                        Contents::Struct(vec![
                            Value::pointer(&Type::pointer_to(&t.int), VEC_DATA),
                            Value::int(&t.int, self.vec_len() as i64),
                        ]),
                    )
                    .at(0x7fa0),
                ),
                local(
                    "scores",
                    39,
                    Value::new(
                        &t.dict,
                        Contents::Struct(vec![
                            Value::int(&t.int, 90 + self.step as i64 % 10),
                            Value::int(&t.int, 75),
                        ]),
                    )
                    .at(0x7f98),
                ),
                local(
                    "broken",
                    39,
                    Value::new(&t.broken, Contents::Struct(vec![Value::int(&t.int, -1)]))
                        .at(0x7f90),
                ),
                local("result", 44, Value::int(&t.int, 0).at(0x7f88)),
            ],
            is_function: true,
            ..Block::default()
        };
        let global = Block {
            symbols: vec![local("g_total", 3, Value::int(&t.int, 100))],
            is_global: true,
            ..Block::default()
        };
        FrameScope {
            line,
            blocks: vec![inner, body, global],
        }
    }

    fn main_scope(&self) -> FrameScope {
        let t = &self.types;
        let argument = |name: &str, value: Value| ScopeSymbol {
            name: name.to_string(),
            is_argument: true,
            line: 10,
            value: Ok(value),
        };
        FrameScope {
            line: 15,
            blocks: vec![Block {
                symbols: vec![
                    argument("argc", Value::int(&t.int, 1).at(0x7ffc)),
                    argument(
                        "argv",
                        Value::pointer(&Type::pointer_to(&t.char_ptr), ARGV).at(0x7ff0),
                    ),
                    ScopeSymbol {
                        name: "status".to_string(),
                        is_argument: false,
                        line: 12,
                        value: Err(InspectError::MemoryAccess { address: 0x8 }),
                    },
                ],
                is_function: true,
                ..Block::default()
            }],
        }
    }

    fn worker_scope(&self) -> FrameScope {
        let t = &self.types;
        FrameScope {
            line: 52,
            blocks: vec![Block {
                symbols: vec![
                    ScopeSymbol {
                        name: "id".to_string(),
                        is_argument: true,
                        line: 50,
                        value: Ok(Value::int(&t.int, 2).at(0x6ffc)),
                    },
                    ScopeSymbol {
                        name: "arg".to_string(),
                        is_argument: true,
                        line: 50,
                        value: Ok(Value::pointer(&t.void_ptr, NODES).at(0x6ff0)),
                    },
                    ScopeSymbol {
                        name: "jobs".to_string(),
                        is_argument: false,
                        line: 51,
                        value: Ok(Value::int(&t.int, self.step as i64 * 2).at(0x6fe8)),
                    },
                ],
                is_function: true,
                ..Block::default()
            }],
        }
    }

    /// Symbols of the selected frame, innermost block first
    fn visible(&self, name: &str) -> Option<Value> {
        let scope = self.frame_scope()?;
        scope
            .blocks
            .into_iter()
            .flat_map(|block| block.symbols)
            .find(|symbol| symbol.name == name)
            .and_then(|symbol| symbol.value.ok())
    }

    fn frame_function(&self, thread: u32, level: usize) -> Option<&'static str> {
        match (thread, level) {
            (1, 0) => Some("process<int>"),
            (1, 1) => Some("main"),
            (2, 0) => Some("worker"),
            _ => None,
        }
    }
}

fn image_offset(address: Address, len: usize) -> Result<usize, InspectError> {
    let end = IMAGE_BASE + IMAGE_LEN as Address;
    if address < IMAGE_BASE || address >= end {
        return Err(InspectError::MemoryAccess { address });
    }
    if address + len as Address > end {
        return Err(InspectError::MemoryAccess { address: end });
    }
    Ok((address - IMAGE_BASE) as usize)
}

fn demo_printers() -> PrinterRegistry {
    let mut printers = PrinterRegistry::new();
    printers.register("IntVec", |value, host| {
        if value.ty.name.as_deref() != Some("IntVec") {
            return None;
        }
        let data = value.field(0).and_then(Value::as_pointer)?;
        let size = value.field(1).and_then(Value::as_i64)?.max(0) as usize;
        let int = Type::int("int");
        let mut inspector = StaticInspector::new()
            .text(format!("IntVec of length {}", size))
            .hint(DisplayHint::Array)
            .with_children();
        match host.read_memory(data, size * 4) {
            Ok(bytes) => {
                for (i, chunk) in bytes.chunks_exact(4).enumerate() {
                    let n = i32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
                    let element = Value::int(&int, n as i64).at(data + 4 * i as Address);
                    inspector = inspector.child(format!("[{}]", i), StaticChild::Value(element));
                }
            }
            Err(e) => inspector = inspector.child("[0]", StaticChild::Error(e)),
        }
        if let Some(reference) = value.reference() {
            inspector = inspector.address(reference);
        }
        Some(inspector.boxed())
    });
    printers.register("Dict", |value, _host| {
        let fields = value.ty.fields().filter(|_| value.ty.name.as_deref() == Some("Dict"))?;
        let mut inspector = StaticInspector::new()
            .text(format!("Dict with {} entries", fields.len()))
            .hint(DisplayHint::Map)
            .with_children();
        for (i, field) in fields.iter().enumerate() {
            let Some(entry) = value.field(i) else {
                continue;
            };
            let key = field.name.clone().unwrap_or_default();
            inspector = inspector
                .child(format!("key{}", i), StaticChild::Text(key))
                .child(format!("value{}", i), StaticChild::Value(entry.clone()));
        }
        Some(inspector.boxed())
    });
    printers.register("Broken", |value, _host| {
        if value.ty.name.as_deref() != Some("Broken") {
            return None;
        }
        Some(
            StaticInspector::new()
                .failing_text(InspectError::printer(
                    "Python Exception <class 'IndexError'>: list index out of range",
                ))
                .boxed(),
        )
    });
    printers
}

fn demo_displays() -> Vec<DisplayExpr> {
    let display = |number: u32, expression: &str, format: Option<&str>| DisplayExpr {
        number,
        enabled: true,
        format: format.map(str::to_string),
        expression: expression.to_string(),
        in_scope: true,
    };
    let mut disabled = display(5, "argv[0]", None);
    disabled.enabled = false;
    vec![
        display(1, "counter", None),
        display(2, "counter", Some("x")),
        display(3, "name", Some("s")),
        display(4, "$pc", Some("i")),
        disabled,
        display(6, "*list", None),
        display(7, "numbers", Some("r")),
        display(8, "missing", None),
    ]
}

impl Host for DemoHost {
    fn dereference(&self, pointer: &Value) -> Result<Value, InspectError> {
        let address = pointer.as_pointer().ok_or(InspectError::NotAPointer)?;
        self.object_at(address)
            .ok_or(InspectError::MemoryAccess { address })
    }

    fn read_string(&self, address: Address) -> Result<String, InspectError> {
        self.read_c_string(address)
    }

    fn read_memory(&self, address: Address, len: usize) -> Result<Vec<u8>, InspectError> {
        let start = image_offset(address, len)?;
        Ok(self.image()[start..start + len].to_vec())
    }

    fn symbol_at(&self, address: Address) -> Option<String> {
        let offset = address.checked_sub(TEXT_BASE)?;
        match offset {
            0x100..=0x7ff => Some(format!("process<int>+{}", offset - 0x100)),
            0x800..=0xfff => Some(format!("worker+{}", offset - 0x800)),
            _ => None,
        }
    }

    fn lookup_printer(&self, value: &Value) -> Option<Box<dyn CustomInspector>> {
        self.printers.lookup(value, self)
    }

    fn convenience(&self, name: &str) -> Option<ValueRef> {
        self.convenience.get(name).cloned()
    }

    fn set_convenience(&mut self, name: &str, value: ValueRef) {
        debug!(slot = name, address = format_args!("{:#x}", value.address), "convenience set");
        self.convenience.insert(name.to_string(), value);
    }

    fn threads(&self) -> Vec<ThreadInfo> {
        [(1, 4242), (2, 4243)]
            .into_iter()
            .map(|(num, lwp)| ThreadInfo {
                num,
                lwp,
                function: self.frame_function(num, 0).map(str::to_string),
                pc: self.pc(num),
                selected: num == self.selected_thread,
            })
            .collect()
    }

    fn has_thread(&self) -> bool {
        true
    }

    fn select_thread(&mut self, num: u32) -> Result<(), InspectError> {
        if !(1..=2).contains(&num) {
            return Err(InspectError::NoThread);
        }
        self.selected_thread = num;
        self.selected_frame = 0;
        Ok(())
    }

    fn frames(&self) -> Vec<FrameInfo> {
        let thread = self.selected_thread;
        (0..FRAMES_PER_THREAD)
            .map(|level| FrameInfo {
                level,
                function: self.frame_function(thread, level).map(str::to_string),
                pc: self.pc(thread) + level as Address * 0x40,
                selected: level == self.selected_frame,
            })
            .collect()
    }

    fn select_frame(&mut self, level: usize) -> Result<(), InspectError> {
        if level >= FRAMES_PER_THREAD {
            return Err(InspectError::Evaluation(format!(
                "No frame at level {}.",
                level
            )));
        }
        self.selected_frame = level;
        Ok(())
    }

    fn frame_scope(&self) -> Option<FrameScope> {
        Some(match (self.selected_thread, self.selected_frame) {
            (1, 0) => self.process_scope(),
            (1, _) => self.main_scope(),
            (2, 0) => self.worker_scope(),
            _ => FrameScope::default(),
        })
    }

    fn displays(&self) -> Vec<DisplayExpr> {
        let scope_has = |name: &str| self.visible(name).is_some();
        self.displays
            .iter()
            .cloned()
            .map(|mut display| {
                let base = display.expression.trim_start_matches('*');
                if !base.starts_with('$') && base != "missing" {
                    display.in_scope = scope_has(base);
                }
                display
            })
            .collect()
    }

    fn evaluate(&self, expression: &str) -> Result<Value, InspectError> {
        let expression = expression.trim();
        if expression == "$pc" {
            let pc = self.pc(self.selected_thread);
            return Ok(Value::pointer(&self.types.void_ptr, pc));
        }
        if let Some(slot) = expression.strip_prefix('$') {
            let pinned = self
                .convenience(slot)
                .ok_or_else(|| InspectError::Evaluation(format!("${} is void", slot)))?;
            return self
                .object_at(pinned.address)
                .ok_or(InspectError::MemoryAccess {
                    address: pinned.address,
                });
        }
        if let Some(inner) = expression.strip_prefix('*') {
            let pointer = self.evaluate(inner)?;
            return self.dereference(&pointer);
        }
        self.visible(expression)
            .ok_or_else(|| InspectError::UnknownSymbol(expression.to_string()))
    }

    fn disassemble(&self, address: Address) -> Option<String> {
        const INSNS: [&str; 4] = [
            "mov    -0x14(%rbp),%eax",
            "add    $0x1,%eax",
            "mov    %eax,-0x14(%rbp)",
            "jmp    0x401120 <process<int>+32>",
        ];
        let symbol = self.symbol_at(address)?;
        let insn = INSNS[(address / 4 % 4) as usize];
        Some(format!("=> {:#x} <{}>:\t{}", address, symbol, insn))
    }

    fn execute(&self, command: &str) -> Result<String, InspectError> {
        match command.trim() {
            "info registers" => {
                let pc = self.pc(self.selected_thread);
                let rax = self.counter() as u64;
                Ok(format!(
                    "rax            {:#x}              {}\n\
                     rsp            0x7fffffffe3a0       0x7fffffffe3a0\n\
                     rip            {:#x}            {:#x} <\x1b[33m{}\x1b[m>\n",
                    rax,
                    rax,
                    pc,
                    pc,
                    self.symbol_at(pc).unwrap_or_default()
                ))
            }
            "info frame" => {
                let level = self.selected_frame;
                let function = self
                    .frame_function(self.selected_thread, level)
                    .unwrap_or("??");
                Ok(format!(
                    "Stack level {}, frame at 0x7fffffffe3c0:\n rip = {:#x} in {}; saved rip = 0x401250\n",
                    level,
                    self.pc(self.selected_thread),
                    function
                ))
            }
            "info threads" => Ok(self
                .threads()
                .iter()
                .map(|t| {
                    format!(
                        "{} {}   Thread {} \"demo\" {}",
                        if t.selected { "*" } else { " " },
                        t.num,
                        t.lwp,
                        t.function.as_deref().unwrap_or("??")
                    )
                })
                .collect::<Vec<_>>()
                .join("\n")),
            other => Err(InspectError::UnknownCommand(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linked_list_dereferences_to_the_end() {
        let host = DemoHost::new();
        let list = host.evaluate("list").unwrap();
        let first = host.dereference(&list).unwrap();
        assert_eq!(first.field(0).and_then(Value::as_i64), Some(10));
        let second = host.dereference(first.field(1).unwrap()).unwrap();
        let third = host.dereference(second.field(1).unwrap()).unwrap();
        let end = third.field(1).unwrap();
        assert_eq!(end.as_pointer(), Some(0));
        assert_eq!(
            host.dereference(end),
            Err(InspectError::MemoryAccess { address: 0 })
        );
    }

    #[test]
    fn test_memory_image_matches_values() {
        let mut host = DemoHost::new();
        host.step();
        host.step();
        let bytes = host.read_memory(COUNTER, 4).unwrap();
        assert_eq!(bytes, 2i32.to_le_bytes());
        assert_eq!(host.read_string(NAME).unwrap(), "gamma");
        assert!(host.read_memory(0x10, 4).is_err());
        assert!(host.read_memory(IMAGE_BASE + 0xff0, 0x20).is_err());
    }

    #[test]
    fn test_selecting_a_thread_changes_scope() {
        let mut host = DemoHost::new();
        assert!(host.evaluate("counter").is_ok());
        host.select_thread(2).unwrap();
        assert_eq!(host.frames()[0].function.as_deref(), Some("worker"));
        assert!(host.evaluate("counter").is_err());
        assert!(host.evaluate("jobs").is_ok());
        assert!(host.select_thread(9).is_err());
    }

    #[test]
    fn test_printers_claim_their_types() {
        let host = DemoHost::new();
        for name in ["numbers", "scores", "broken"] {
            let value = host.evaluate(name).unwrap();
            assert!(host.lookup_printer(&value).is_some(), "{}", name);
        }
        let counter = host.evaluate("counter").unwrap();
        assert!(host.lookup_printer(&counter).is_none());
    }

    #[test]
    fn test_displays_track_scope() {
        let mut host = DemoHost::new();
        host.select_thread(2).unwrap();
        let displays = host.displays();
        assert!(!displays[0].in_scope);
        assert!(displays[3].in_scope);
    }

    #[test]
    fn test_unknown_command() {
        let host = DemoHost::new();
        assert!(host.execute("info registers").unwrap().contains("rip"));
        assert_eq!(
            host.execute("frobnicate"),
            Err(InspectError::UnknownCommand("frobnicate".into()))
        );
    }
}
