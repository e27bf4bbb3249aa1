//! The tree walk that ties mutators, collector and placers together.
//!
//! Every node is offered to the mutators on the way down. On the way back
//! up, the mutants waiting inside the node's range are handed to the first
//! placer that accepts the node. Mutants nobody accepts wait for an
//! enclosing node.

use std::collections::HashSet;
use std::mem;

use swc_core::common::sync::Lrc;
use swc_core::common::{BytePos, SourceFile, SourceMap, Span, Spanned};
use swc_core::ecma::ast::{
    ArrowExpr, AssignExpr, AssignPat, AssignPatProp, BlockStmt, BlockStmtOrExpr, Callee,
    CallExpr, Class, ClassDecl, ClassMember, ComputedPropName, CondExpr, Constructor, Decorator,
    DoWhileStmt, Expr, ExprOrSpread, ExprStmt, FnDecl, ForInStmt, ForOfStmt, ForStmt, Function,
    GetterProp, IfStmt, ImportDecl, JSXExpr, JSXExprContainer, KeyValueProp, LabeledStmt,
    MemberExpr, MemberProp, Module, ModuleItem, ParamOrTsParamProp, ParenExpr, Pat, PropName,
    ReturnStmt, SeqExpr, SetterProp, Stmt, SwitchCase, TaggedTpl, ThrowStmt, Tpl, TsEnumDecl,
    TsExprWithTypeArgs, TsImportEqualsDecl, TsInterfaceDecl, TsModuleDecl, TsType,
    TsTypeAliasDecl, TsTypeAnn, TsTypeParamDecl, TsTypeParamInstantiation, UpdateExpr, VarDecl,
    VarDeclarator, WhileStmt,
};
use swc_core::ecma::visit::{VisitMut, VisitMutWith};

use crate::collector::{MutantCollector, NewMutant};
use crate::error::{InstrumentError, PlacementError};
use crate::mutant::{Mutant, NodeKey, NodeKind};
use crate::mutators::{BlockSlot, ExprSlot, NodeContext, NodeRef, StmtSlot, mutate_all};
use crate::options::FileOptions;
use crate::placers::{Anchor, Placer};
use crate::printers::render_mutant;
use crate::report::code_frame;
use crate::span::{ByteRange, LineIndex};
use crate::syntax::{ScriptAst, span_range};
use crate::syntax_helpers::{insert_header, is_directive};

/// Mutate `script` in place and register its mutants with `collector`.
///
/// `lines` indexes the whole file the script belongs to. The bootstrap
/// header is added only when at least one mutant was placed in the script.
pub fn transform_script(
    script: &mut ScriptAst,
    file_name: &str,
    lines: &LineIndex,
    collector: &mut MutantCollector,
    options: &FileOptions,
) -> Result<(), InstrumentError> {
    let ScriptAst {
        module,
        source_map,
        source_file,
        offset,
        instrumented,
        ..
    } = script;

    let mut transformer = Transformer {
        file_name,
        lines,
        source_map,
        source_file,
        offset: *offset,
        collector: &mut *collector,
        options,
        expr_slot: ExprSlot::default(),
        stmt_slot: StmtSlot::default(),
        block_slot: BlockSlot::default(),
        classes: Vec::new(),
        directives: HashSet::new(),
        placed: 0,
        error: None,
    };
    module.visit_mut_with(&mut transformer);

    let Transformer { placed, error, .. } = transformer;
    if let Some(error) = error {
        return Err(error);
    }

    // Earlier scripts of the file either placed everything or failed.
    let leftovers = collector.unplaced_mutants_in_file(file_name);
    if let Some(first) = leftovers.first() {
        return Err(InstrumentError::UnplacedMutants(placement_error(
            file_name,
            lines,
            None,
            &leftovers,
            first.range,
            "no enclosing node can host them".to_string(),
        )));
    }

    if placed > 0 {
        insert_header(module)?;
        *instrumented = true;
    }

    tracing::debug!(file = file_name, placed, "transformed script");
    Ok(())
}

fn placement_error(
    file_name: &str,
    lines: &LineIndex,
    placer: Option<&'static str>,
    mutants: &[&Mutant],
    range: ByteRange,
    reason: String,
) -> PlacementError {
    let position = lines.position(range.start);

    let mut mutator_names: Vec<&'static str> = mutants.iter().map(|m| m.mutator_name).collect();
    mutator_names.sort_unstable();
    mutator_names.dedup();

    PlacementError {
        file: file_name.to_string(),
        line: position.line + 1,
        column: position.column + 1,
        placer,
        mutator_names,
        reason,
        code_frame: code_frame(lines, range),
    }
}

fn loads_module(callee: &Callee) -> bool {
    match callee {
        Callee::Import(_) => true,
        Callee::Expr(expr) => matches!(&**expr, Expr::Ident(ident) if &*ident.sym == "require"),
        Callee::Super(_) => false,
    }
}

fn has_initialized_props(class: &Class) -> bool {
    class.body.iter().any(|member| match member {
        ClassMember::ClassProp(prop) => prop.value.is_some(),
        ClassMember::PrivateProp(prop) => prop.value.is_some(),
        _ => false,
    })
}

struct Transformer<'a> {
    file_name: &'a str,
    lines: &'a LineIndex,
    source_map: &'a Lrc<SourceMap>,
    source_file: &'a SourceFile,
    offset: usize,
    collector: &'a mut MutantCollector,
    options: &'a FileOptions,

    /// Position of the next expression entered; set by its parent.
    expr_slot: ExprSlot,
    stmt_slot: StmtSlot,
    block_slot: BlockSlot,

    /// For each enclosing class, whether it declares an initialized property.
    classes: Vec<bool>,

    /// Start of every statement in a directive prologue seen so far.
    directives: HashSet<BytePos>,

    placed: usize,

    /// First failure; the rest of the walk is skipped once set.
    error: Option<InstrumentError>,
}

impl Transformer<'_> {
    fn mark_directives<'s>(&mut self, stmts: impl IntoIterator<Item = &'s Stmt>) {
        let prologue = stmts.into_iter().take_while(|stmt| is_directive(stmt));
        self.directives.extend(prologue.map(|stmt| stmt.span().lo));
    }

    fn range_of(&self, span: Span) -> Option<ByteRange> {
        span_range(span, self.source_file, self.offset)
    }

    fn register(&mut self, node: NodeRef<'_>, kind: NodeKind, span: Span, ctx: &NodeContext) {
        let Some(range) = self.range_of(span) else {
            return;
        };
        if !self.options.is_eligible(range) {
            return;
        }

        for (mutator, replacement) in mutate_all(node, ctx) {
            let ignore_reason = self
                .options
                .is_excluded(mutator.name())
                .then(|| format!("Ignored because of excluded mutation \"{mutator}\""));
            let replacement_code = render_mutant(&replacement, self.source_map);

            let mutant = self.collector.add(
                self.file_name,
                NewMutant {
                    mutator_name: mutator.name(),
                    original: NodeKey::new(kind, span),
                    replacement,
                    range,
                    location: self.lines.location(range),
                    replacement_code,
                    ignore_reason,
                },
            );
            tracing::trace!(id = mutant.id, mutator = mutant.mutator_name, "registered mutant");
        }
    }

    fn place(&mut self, mut anchor: Anchor<'_>, span: Span) {
        if self.error.is_some() {
            return;
        }
        let Some(scope) = self.range_of(span) else {
            return;
        };

        let pending: Vec<&Mutant> = self
            .collector
            .find_unplaced_mutants_in_scope(scope)
            .into_iter()
            .filter(|m| m.file_name == self.file_name)
            .collect();
        if pending.is_empty() {
            return;
        }

        let Some(placer) = Placer::CHAIN.into_iter().find(|p| p.can_place(&anchor)) else {
            return;
        };

        match placer.place(&mut anchor, &pending) {
            Ok(()) => {
                let ids: Vec<usize> = pending.iter().map(|m| m.id).collect();
                tracing::debug!(
                    file = self.file_name,
                    placer = placer.name(),
                    ?ids,
                    "placed mutants"
                );
                self.placed += ids.len();
                self.collector.mark_mutants_as_placed(&ids);
            }
            Err(reason) => {
                let error = placement_error(
                    self.file_name,
                    self.lines,
                    Some(placer.name()),
                    &pending,
                    scope,
                    reason,
                );
                self.error = Some(InstrumentError::Placement(error));
            }
        }
    }

    fn visit_expr_in(&mut self, expr: &mut Expr, slot: ExprSlot) {
        self.expr_slot = slot;
        expr.visit_mut_with(self);
    }

    /// Visit an assignment target; the first expression inside is the target.
    fn visit_target<N: VisitMutWith<Self>>(&mut self, node: &mut N) {
        self.expr_slot = ExprSlot::AssignTarget;
        node.visit_mut_with(self);
        self.expr_slot = ExprSlot::default();
    }
}

impl VisitMut for Transformer<'_> {
    fn visit_mut_module(&mut self, module: &mut Module) {
        self.mark_directives(module.body.iter().map_while(|item| match item {
            ModuleItem::Stmt(stmt) => Some(stmt),
            ModuleItem::ModuleDecl(_) => None,
        }));
        module.visit_mut_children_with(self);
    }

    fn visit_mut_function(&mut self, function: &mut Function) {
        if let Some(body) = &function.body {
            self.mark_directives(&body.stmts);
        }
        function.visit_mut_children_with(self);
    }

    fn visit_mut_getter_prop(&mut self, prop: &mut GetterProp) {
        if let Some(body) = &prop.body {
            self.mark_directives(&body.stmts);
        }
        prop.visit_mut_children_with(self);
    }

    fn visit_mut_setter_prop(&mut self, prop: &mut SetterProp) {
        if let Some(body) = &prop.body {
            self.mark_directives(&body.stmts);
        }
        prop.visit_mut_children_with(self);
    }

    fn visit_mut_expr(&mut self, expr: &mut Expr) {
        let slot = mem::take(&mut self.expr_slot);
        if self.error.is_some() {
            return;
        }

        let span = expr.span();
        let ctx = NodeContext::expr(slot.clone());
        self.register(NodeRef::Expr(&*expr), NodeKind::Expression, span, &ctx);

        expr.visit_mut_children_with(self);

        self.place(Anchor::Expr { expr, slot: &slot }, span);
    }

    fn visit_mut_stmt(&mut self, stmt: &mut Stmt) {
        let slot = mem::take(&mut self.stmt_slot);
        if self.error.is_some() {
            return;
        }

        let span = stmt.span();
        self.register(NodeRef::Stmt(&*stmt), NodeKind::Statement, span, &NodeContext::default());

        stmt.visit_mut_children_with(self);

        self.place(Anchor::Stmt { stmt, slot }, span);
    }

    fn visit_mut_block_stmt(&mut self, block: &mut BlockStmt) {
        let slot = mem::take(&mut self.block_slot);
        if self.error.is_some() {
            return;
        }

        let span = block.span;
        self.register(NodeRef::Block(&*block), NodeKind::Block, span, &NodeContext::block(slot));

        block.visit_mut_children_with(self);

        self.place(Anchor::Block(block), span);
    }

    fn visit_mut_switch_case(&mut self, case: &mut SwitchCase) {
        if self.error.is_some() {
            return;
        }

        let span = case.span;
        self.register(NodeRef::Case(&*case), NodeKind::SwitchCase, span, &NodeContext::default());

        case.visit_mut_children_with(self);

        self.place(Anchor::Case(case), span);
    }

    // Nothing below these is ever mutated.

    fn visit_mut_ts_type(&mut self, _: &mut TsType) {}
    fn visit_mut_ts_type_ann(&mut self, _: &mut TsTypeAnn) {}
    fn visit_mut_ts_type_param_decl(&mut self, _: &mut TsTypeParamDecl) {}
    fn visit_mut_ts_type_param_instantiation(&mut self, _: &mut TsTypeParamInstantiation) {}
    fn visit_mut_ts_expr_with_type_args(&mut self, _: &mut TsExprWithTypeArgs) {}
    fn visit_mut_ts_interface_decl(&mut self, _: &mut TsInterfaceDecl) {}
    fn visit_mut_ts_type_alias_decl(&mut self, _: &mut TsTypeAliasDecl) {}
    fn visit_mut_ts_enum_decl(&mut self, _: &mut TsEnumDecl) {}
    fn visit_mut_ts_module_decl(&mut self, _: &mut TsModuleDecl) {}
    fn visit_mut_ts_import_equals_decl(&mut self, _: &mut TsImportEqualsDecl) {}
    fn visit_mut_import_decl(&mut self, _: &mut ImportDecl) {}
    fn visit_mut_decorator(&mut self, _: &mut Decorator) {}

    fn visit_mut_fn_decl(&mut self, decl: &mut FnDecl) {
        if !decl.declare {
            decl.visit_mut_children_with(self);
        }
    }

    fn visit_mut_class_decl(&mut self, decl: &mut ClassDecl) {
        if !decl.declare {
            decl.visit_mut_children_with(self);
        }
    }

    fn visit_mut_var_decl(&mut self, decl: &mut VarDecl) {
        if !decl.declare {
            decl.visit_mut_children_with(self);
        }
    }

    fn visit_mut_class(&mut self, class: &mut Class) {
        self.classes.push(has_initialized_props(class));
        class.visit_mut_children_with(self);
        self.classes.pop();
    }

    fn visit_mut_constructor(&mut self, ctor: &mut Constructor) {
        ctor.key.visit_mut_with(self);
        ctor.params.visit_mut_with(self);

        let has_param_props = ctor
            .params
            .iter()
            .any(|p| matches!(p, ParamOrTsParamProp::TsParamProp(_)));
        let has_initialized_props = self.classes.last().copied().unwrap_or(false);

        if let Some(body) = &mut ctor.body {
            self.mark_directives(&body.stmts);
            self.block_slot = BlockSlot::ConstructorBody {
                has_param_props,
                has_initialized_props,
            };
            body.visit_mut_with(self);
        }
    }

    fn visit_mut_labeled_stmt(&mut self, stmt: &mut LabeledStmt) {
        self.stmt_slot = StmtSlot::LabelBody;
        stmt.body.visit_mut_with(self);
    }

    fn visit_mut_expr_stmt(&mut self, stmt: &mut ExprStmt) {
        let slot = if self.directives.contains(&stmt.span.lo) {
            ExprSlot::Directive
        } else {
            ExprSlot::ExprStatement
        };
        self.visit_expr_in(&mut stmt.expr, slot);
    }

    fn visit_mut_if_stmt(&mut self, stmt: &mut IfStmt) {
        self.visit_expr_in(&mut stmt.test, ExprSlot::IfTest);
        stmt.cons.visit_mut_with(self);
        stmt.alt.visit_mut_with(self);
    }

    fn visit_mut_while_stmt(&mut self, stmt: &mut WhileStmt) {
        self.visit_expr_in(&mut stmt.test, ExprSlot::LoopTest);
        stmt.body.visit_mut_with(self);
    }

    fn visit_mut_do_while_stmt(&mut self, stmt: &mut DoWhileStmt) {
        stmt.body.visit_mut_with(self);
        self.visit_expr_in(&mut stmt.test, ExprSlot::LoopTest);
    }

    fn visit_mut_for_stmt(&mut self, stmt: &mut ForStmt) {
        stmt.init.visit_mut_with(self);
        if let Some(test) = &mut stmt.test {
            self.visit_expr_in(test, ExprSlot::LoopTest);
        }
        stmt.update.visit_mut_with(self);
        stmt.body.visit_mut_with(self);
    }

    fn visit_mut_for_in_stmt(&mut self, stmt: &mut ForInStmt) {
        self.visit_target(&mut stmt.left);
        stmt.right.visit_mut_with(self);
        stmt.body.visit_mut_with(self);
    }

    fn visit_mut_for_of_stmt(&mut self, stmt: &mut ForOfStmt) {
        self.visit_target(&mut stmt.left);
        stmt.right.visit_mut_with(self);
        stmt.body.visit_mut_with(self);
    }

    fn visit_mut_return_stmt(&mut self, stmt: &mut ReturnStmt) {
        if let Some(arg) = &mut stmt.arg {
            self.visit_expr_in(arg, ExprSlot::Return);
        }
    }

    fn visit_mut_throw_stmt(&mut self, stmt: &mut ThrowStmt) {
        self.visit_expr_in(&mut stmt.arg, ExprSlot::Return);
    }

    fn visit_mut_var_declarator(&mut self, decl: &mut VarDeclarator) {
        decl.name.visit_mut_with(self);

        let name = match &decl.name {
            Pat::Ident(binding) => Some(binding.id.clone()),
            _ => None,
        };
        if let Some(init) = &mut decl.init {
            self.visit_expr_in(init, ExprSlot::VarInit(name));
        }
    }

    fn visit_mut_key_value_prop(&mut self, prop: &mut KeyValueProp) {
        prop.key.visit_mut_with(self);

        let name = match &prop.key {
            PropName::Ident(ident) => Some(ident.clone()),
            _ => None,
        };
        self.visit_expr_in(&mut prop.value, ExprSlot::PropValue(name));
    }

    fn visit_mut_computed_prop_name(&mut self, name: &mut ComputedPropName) {
        self.visit_expr_in(&mut name.expr, ExprSlot::ObjectKey);
    }

    fn visit_mut_member_expr(&mut self, member: &mut MemberExpr) {
        member.obj.visit_mut_with(self);
        if let MemberProp::Computed(prop) = &mut member.prop {
            self.visit_expr_in(&mut prop.expr, ExprSlot::Operand);
        }
    }

    fn visit_mut_call_expr(&mut self, call: &mut CallExpr) {
        call.callee.visit_mut_with(self);

        let loads_module = loads_module(&call.callee);
        for (index, arg) in call.args.iter_mut().enumerate() {
            let slot = if index == 0 && loads_module {
                ExprSlot::ModuleSpecifier
            } else {
                ExprSlot::Element
            };
            self.visit_expr_in(&mut arg.expr, slot);
        }
    }

    fn visit_mut_expr_or_spread(&mut self, arg: &mut ExprOrSpread) {
        self.visit_expr_in(&mut arg.expr, ExprSlot::Element);
    }

    fn visit_mut_tagged_tpl(&mut self, tagged: &mut TaggedTpl) {
        self.visit_expr_in(&mut tagged.tag, ExprSlot::TaggedTemplateTag);
        tagged.tpl.visit_mut_with(self);
    }

    fn visit_mut_tpl(&mut self, tpl: &mut Tpl) {
        for expr in &mut tpl.exprs {
            self.visit_expr_in(expr, ExprSlot::Template);
        }
    }

    fn visit_mut_cond_expr(&mut self, cond: &mut CondExpr) {
        self.visit_expr_in(&mut cond.test, ExprSlot::CondTest);
        self.visit_expr_in(&mut cond.cons, ExprSlot::Branch);
        self.visit_expr_in(&mut cond.alt, ExprSlot::Branch);
    }

    fn visit_mut_assign_expr(&mut self, assign: &mut AssignExpr) {
        self.visit_target(&mut assign.left);
        self.visit_expr_in(&mut assign.right, ExprSlot::AssignValue);
    }

    fn visit_mut_update_expr(&mut self, update: &mut UpdateExpr) {
        self.visit_expr_in(&mut update.arg, ExprSlot::AssignTarget);
    }

    fn visit_mut_pat(&mut self, pat: &mut Pat) {
        match pat {
            Pat::Expr(expr) => self.visit_expr_in(expr, ExprSlot::AssignTarget),
            _ => pat.visit_mut_children_with(self),
        }
    }

    fn visit_mut_assign_pat(&mut self, pat: &mut AssignPat) {
        pat.left.visit_mut_with(self);
        self.visit_expr_in(&mut pat.right, ExprSlot::DefaultValue);
    }

    fn visit_mut_assign_pat_prop(&mut self, prop: &mut AssignPatProp) {
        if let Some(value) = &mut prop.value {
            self.visit_expr_in(value, ExprSlot::DefaultValue);
        }
    }

    fn visit_mut_arrow_expr(&mut self, arrow: &mut ArrowExpr) {
        arrow.params.visit_mut_with(self);

        let body: &mut BlockStmtOrExpr = &mut arrow.body;
        match body {
            BlockStmtOrExpr::Expr(expr) => self.visit_expr_in(expr, ExprSlot::ArrowBody),
            BlockStmtOrExpr::BlockStmt(block) => {
                self.mark_directives(&block.stmts);
                block.visit_mut_with(self);
            }
        }
    }

    fn visit_mut_paren_expr(&mut self, paren: &mut ParenExpr) {
        self.visit_expr_in(&mut paren.expr, ExprSlot::Paren);
    }

    fn visit_mut_seq_expr(&mut self, seq: &mut SeqExpr) {
        for expr in &mut seq.exprs {
            self.visit_expr_in(expr, ExprSlot::Sequence);
        }
    }

    fn visit_mut_jsx_expr_container(&mut self, container: &mut JSXExprContainer) {
        if let JSXExpr::Expr(expr) = &mut container.expr {
            self.visit_expr_in(expr, ExprSlot::JsxContainer);
        }
    }
}
