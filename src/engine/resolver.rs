// ==========================================
// 零件日库存推演系统 - 零件别名归并引擎
// ==========================================
// 职责: 对结存矩阵做列级归并, 使列集 = 规范零件号集
// 红线: 应用顺序固定 排除 → 1对1 → 多对1;
//       归并是求和不是覆盖; 引用不存在的列按无操作处理
// ==========================================

use crate::config::AliasRules;
use crate::domain::DayPartGrid;
use tracing::debug;

// ==========================================
// PartAliasResolver - 别名归并引擎
// ==========================================
pub struct PartAliasResolver {
    rules: AliasRules,
}

impl PartAliasResolver {
    pub fn new(rules: AliasRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &AliasRules {
        &self.rules
    }

    /// 对矩阵应用全部归并规则, 返回列集归并后的矩阵
    pub fn resolve(&self, mut grid: DayPartGrid) -> DayPartGrid {
        // 第一步: 排除
        for part_no in &self.rules.exclude {
            if grid.drop_part(part_no) {
                debug!(part_no = %part_no, "已排除零件列");
            }
        }

        // 第二步: 1对1归并
        // 目标列已存在则求和后删除别名列, 否则原位改名
        for rule in &self.rules.rename {
            if !grid.has_part(&rule.alias) {
                continue;
            }
            if grid.has_part(&rule.canonical) {
                grid.add_into(&rule.alias, &rule.canonical);
                grid.drop_part(&rule.alias);
            } else {
                grid.rename_part(&rule.alias, &rule.canonical);
            }
            debug!(alias = %rule.alias, canonical = %rule.canonical, "1对1归并完成");
        }

        // 第三步: 多对1归并
        // 目标列不存在时由首个在场别名的整列创建
        for rule in &self.rules.merge {
            for alias in &rule.aliases {
                if !grid.has_part(alias) {
                    continue;
                }
                if grid.has_part(&rule.canonical) {
                    grid.add_into(alias, &rule.canonical);
                    grid.drop_part(alias);
                } else if let Some(values) = grid.take_column(alias) {
                    grid.append_part(&rule.canonical, values);
                }
                debug!(alias = %alias, canonical = %rule.canonical, "多对1归并完成");
            }
        }

        grid
    }
}
