//! Prompt construction: intro, numbered source, rules, taxonomy, output contract.

use std::fmt::Write as _;

use crate::reserved::ReservedWords;
use crate::taxonomy::{DefectCategory, DefectLevel};

/// System role sent with every request.
pub const SYSTEM_PROMPT: &str =
    "You are a verilog code defect checker and are able to follow the defined rules.";

const CHECKLIST_HEAD: &str = "\
Please check this <code> step by step using the following steps and rules.
    step 1: Identify punctuation marks
        (1) chinese punctuation cannot appear in the code.
    step 2: Identify module
        (1) Module must be wrapped by 'module-endmodule'.
    step 3: Identify statements
        (1) For statements in the module header, end with (','), and do not punctuate the last statement.
        (2) For statements outside the module header, end with (';').
    step 4: Identify variables
        (1) For variables defined in the module header, the port type ('input', 'output', 'inout') must be defined.
            a. For 'input' type variables, they must be assigned to other variables.
            b. For 'output' type variables, they need to be assigned values by other variables.
            c. For 'inout' type variables, they can be assigned to other variables or assigned to other variables.
        (2) For variables not defined in the module header, the port type ('input', 'output', 'inout') cannot be defined.
        (3) For each variable, the data type ('wire', 'reg') must be defined.
            a. For variables of type 'wire', to be used in combinatorial logic.
            b. For variables of type 'reg', to be used in temporal logic.
            c. The default data type for variables is 'wire'.
        (4) For each variable, declare the bit-width ([MSB:LSB], which satisfies MSB>LSB), the default bit-width is 1, which can be omitted.
            a. Variable of bit width 1 ([0:0]) cannot be declared.
            b. For variables with a bit-width greater than 1, use the process to match the bit-width of the variable involved in the operation, neither exceeding the index nor leaving the bit-width free.
        (5) For assigning Values to Variable.
            a. To comply with the bit width requirements, distinguishing between binary, octal and hexadecimal mechanisms; each bit of octal represents three bits of binary, and each bit of hexadecimal represents four bits of binary.
            b. Cannot have an indefinite state ('x','X') or a highly resistive state ('z','Z').
        (6) Each variable is to be used.
    step 5: Identify 'always' block
        (1) The 'always' block should be wrapped with 'begin-end'.
        (2) Identify 'always' types.
            a. Temporal logic.
            b. Combinational logic.
        (3) Identify sensitive lists.
            a. Sensitive list of temporal logic.
                ① Each signal in the sensitive list should have a 'posedge' edge or a 'negedge' edge.
                ② For the judgment signal in the if condition, the original signal is used for the 'posedge' edge and the negative signal is used for the 'negedge' edge.
                ③ Use ('or',',') to connect multiple signals in the sensitive list.
                ④ All signals used in the sensitive list should be listed.
            b. Sensitive list of combinatorial logic.
                ① Signals in the sensitive list cannot have a 'posedge' or 'negedge' edge.
                ② Multiple signals in the sensitive list are connected by ('or',',').
                ③ All signals used should be listed in the sensitive list or replaced by ('*').
            c. Cannot mix signals with edges and signals without edges.
            d. Cannot include extraneous signals.
        (4) Identify the mode of assignment
            a. Non-blocking assignment ('<=') is used in temporal logic.
            b. The use of blocking assignment methods ('=') in combinational logic.
            c. Cannot mix non-blocking assignment methods ('<=') and blocking methods ('=').
    step 6: Identify 'begin-end' block
        (1) 'begin' and 'end' always occur in pairs.
        (2) For statements that execute one statement a time, 'begin-end' can be omitted.
        (3) For statements that execute more than one statement at a time, 'begin-end' cannot be omitted.
";

const CHECKLIST_TAIL: &str = "\
    step 8: Identify race or hazard condition
        (1) In temporal logic, a variable cannot be read immediately after it is assigned a value in the same 'always' block.
        (2) In temporal logic, it is not possible to assign a value to the same variable in the same sensitive list of 'always' block.
    step 9: Identify 'case' structure
        (1) The 'case' structure should have a 'default' statement.
        (2) The 'case' structure should include all possible branches.
        (3) The 'case' structure should be wrapped in a 'case-endcase'.
    step 10: Identify instantiated modules
        (1) Module port instantiation methods.
            a. Connected by position.
            b. Connected by name.
            c. Cannot mix the two methods.
        (2) The number of modules instantiated should be the same as the number required in the code.
        (3) The port type ('input', 'output', 'inout'), data type ('wire', 'reg') and data bit width of the module instantiation should be the same.
        (4) Each port should be connected when instantiated, not floating.
    step 11: Identify operator
        (1) For the bitwise operators ('&', '|', '^', '~'), which are used for operations on multi-bit width variables.
        (2) For logical operators ('&&', '||', '!'), which are used for one-bit width variables.
";

const MULTIPLE_DEFECT_ANALYSIS: &str = "\
    MULTIPLE DEFECT ANALYSIS:
    If multiple defects are detected, perform priority analysis:
    step 1: Number all defects sequentially as D1, D2, D3, etc.
    step 2: For each defect, simulate fixing it and count remaining defects (N1, N2, N3...)
    step 3: The defect with the smallest remaining defect count is the main defect
    step 4: Report the main defect line and all defect lines
";

const OUTPUT_FORMAT: &str = "\
    OUTPUT FORMAT:
    If NO defects found:
    RESULT: [NO]

    If SINGLE defect found:
    RESULT: [YES]
    DEFECT LINE: [line number]
    DEFECT CATEGORY: [category name]
    DESCRIPTION: [brief overview]

    If MULTIPLE defects found:
    RESULT: [YES]
    MULTIPLE DEFECTS: [YES]
    ALL DEFECT LINES: [line1-line2-line3]
    MAIN DEFECT LINE: [primary line number]
    DEFECT CATEGORY: [category of main defect]
    DESCRIPTION: [brief overview of main defect]

    Keep descriptions concise - just overview, not detailed explanations.";

/// Split source text into lines that keep their terminators, the form
/// [`PromptBuilder::build`] expects.
pub fn source_lines(source: &str) -> Vec<&str> {
    source.split_inclusive('\n').collect()
}

/// Builds the analysis prompt for one module. Pure apart from the reserved
/// words captured at construction.
#[derive(Debug, Clone, Default)]
pub struct PromptBuilder {
    reserved: ReservedWords,
}

impl PromptBuilder {
    pub fn new(reserved: ReservedWords) -> Self {
        Self { reserved }
    }

    /// `lines` are numbered from 1 and concatenated as given, so each line
    /// should carry its own terminator (see [`source_lines`]).
    pub fn build<S: AsRef<str>>(&self, module_name: &str, lines: &[S]) -> String {
        let mut out = format!(
            "The following <code> is the Verilog code for the module named <{}>.\n",
            module_name
        );
        for (i, line) in lines.iter().enumerate() {
            let _ = write!(out, "{}: {}", i + 1, line.as_ref());
        }
        out.push('\n');
        out.push_str(&self.rules());
        out
    }

    /// The rules document: checklist, taxonomy, multi-defect procedure and
    /// output contract.
    pub fn rules(&self) -> String {
        let mut out = String::from(CHECKLIST_HEAD);
        let _ = write!(
            out,
            "    step 7: Identify reserved words\n        \
             (1) verilog includes reserved words: {}\n        \
             (2) Cannot use reserved words as variable or module names.\n        \
             (3) Cannot use reserved words that do not exist in verilog.\n",
            self.reserved.as_str()
        );
        out.push_str(CHECKLIST_TAIL);
        out.push('\n');
        out.push_str(&taxonomy_section());
        out.push('\n');
        out.push_str(MULTIPLE_DEFECT_ANALYSIS);
        out.push('\n');
        out.push_str(OUTPUT_FORMAT);
        out
    }
}

fn taxonomy_section() -> String {
    let mut out = String::from(
        "    DEFECT CATEGORIES:\n    \
         When you find a defect, classify it into one of these specific categories:\n",
    );
    let mut current: Option<DefectLevel> = None;
    for (i, category) in DefectCategory::ALL.iter().enumerate() {
        let level = category.level();
        if current != Some(level) {
            let _ = write!(out, "\n    {}:\n", level.heading());
            current = Some(level);
        }
        let _ = writeln!(
            out,
            "    {}. {} - {}",
            i + 1,
            category.tag(),
            category.summary()
        );
    }
    out
}
