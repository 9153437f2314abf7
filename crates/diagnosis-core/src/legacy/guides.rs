//! Follow-up guides sent after a choice diagnosis, one per outcome.

use super::choice::DiagnosisType;

const SELL_GUIDE: &str = r#"■ 売却を検討する際の詳細ガイド

【ステップ1】実家の査定を依頼
・複数の不動産会社に査定依頼（最低3社）
・査定額だけでなく、売却実績も確認
・相場を把握することが第一歩

【ステップ2】相続登記の確認
・登記簿謄本を取得して所有者を確認
・未登記の場合は早急に相続登記を
・司法書士に相談すると確実

【ステップ3】家族との方針共有
・全員の同意を得ることが重要
・売却時期、価格、分配方法を話し合う
・書面での合意が望ましい

【税金について】
・譲渡所得税がかかる可能性
・3,000万円特別控除の適用条件確認
・税理士への相談を推奨"#;

const RENT_GUIDE: &str = r#"■ 賃貸を検討する際の詳細ガイド

【ステップ1】賃貸需要の調査
・周辺の家賃相場を調べる
・空室率、入居者層を確認
・管理会社に市場調査を依頼

【ステップ2】物件状態の確認
・修繕が必要な箇所をリストアップ
・最低限のリフォーム費用を見積もる
・設備の動作確認

【ステップ3】管理会社の選定
・管理手数料の相場は家賃の5-10%
・実績、対応力を比較検討
・サブリース（一括借上げ）も選択肢

【収支シミュレーション】
・想定家賃収入
・固定資産税、修繕費、管理費
・空室リスクを考慮した収支計画"#;

const KEEP_GUIDE: &str = r#"■ 所有継続する際の詳細ガイド

【ステップ1】定期管理計画の策定
・月1回以上の換気、掃除
・庭木の手入れ、草刈り
・郵便物の整理

【ステップ2】維持費用の把握
・固定資産税
・光熱費（基本料金）
・火災保険
・管理委託費（必要な場合）

【ステップ3】将来の活用方法検討
・セカンドハウスとして利用
・リノベーションして賃貸
・将来的な売却の可能性

【空き家管理サービス】
・月1回の巡回：月5,000円〜
・庭の手入れ：別途見積
・郵便物転送サービス"#;

const HYBRID_GUIDE: &str = r#"■ 複数選択肢を比較する際のガイド

◆売却
メリット：まとまった資金が手に入る／維持管理の負担がなくなる／相続人間での分配がしやすい
デメリット：思い出の家を手放すことになる／売却後は取り戻せない／税金がかかる可能性

◆賃貸
メリット：所有権は維持しつつ収入を得られる／将来的な選択肢を残せる／家が荒れるのを防げる
デメリット：入居者トラブルのリスク／空室リスク／管理の手間とコスト

◆所有継続
メリット：いつでも使える状態を保てる／思い出の場所を残せる
デメリット：維持費用がかかり続ける／管理の手間／空き家リスク

【専門家への相談を】
・不動産会社：売却・賃貸の見積もり
・税理士：税金面のアドバイス
・ファイナンシャルプランナー：総合的な資産計画"#;

pub fn detailed_guide(diagnosis_type: DiagnosisType) -> &'static str {
    match diagnosis_type {
        DiagnosisType::Sell => SELL_GUIDE,
        DiagnosisType::Rent => RENT_GUIDE,
        DiagnosisType::Keep => KEEP_GUIDE,
        DiagnosisType::Hybrid => HYBRID_GUIDE,
    }
}
